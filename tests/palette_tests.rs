use offcpu_flame::palette::{frame_color, name_hash, FrameLabel, Rgb, HIGHLIGHT};

#[test]
fn test_hash_of_nothing_is_zero() {
    assert_eq!(name_hash(Some("")), 0.0);
    assert_eq!(name_hash(None), 0.0);
}

#[test]
fn test_hash_monotonic_in_char_code() {
    // '2'..=';' covers every residue 0..=9 in order
    for len in 1..=7 {
        let mut previous = -1.0;
        for code in b'2'..=b';' {
            let name = (code as char).to_string().repeat(len);
            let v = name_hash(Some(&name));
            assert!(v > previous, "len {} code {}: {} <= {}", len, code, v, previous);
            previous = v;
        }
    }
}

#[test]
fn test_hash_only_sees_first_seven_chars() {
    for s in ["do_nanosleep", "__x64_sys_futex", "pthread_cond_wait", "abcdefghij"] {
        let prefix: String = s.chars().take(7).collect();
        assert_eq!(name_hash(Some(s)), name_hash(Some(&prefix)));
    }
}

#[test]
fn test_common_prefix_gives_similar_colors() {
    let a = name_hash(Some("futex_wait"));
    let b = name_hash(Some("futex_wake"));
    let c = name_hash(Some("epoll_wait"));
    assert!((a - b).abs() < (a - c).abs());
}

#[test]
fn test_highlight_color_ignores_name() {
    for name in ["schedule", "", "libc`read(int)"] {
        assert_eq!(frame_color(&FrameLabel::new(name).highlighted(true)), HIGHLIGHT);
    }
    assert_eq!(HIGHLIGHT, Rgb::new(230, 0, 230));
}

#[test]
fn test_color_channels() {
    // 'c' hashes to 1.0, 'Z' to 0.0
    assert_eq!(frame_color(&FrameLabel::new("c")), Rgb::new(0, 0, 255));
    assert_eq!(frame_color(&FrameLabel::new("Z")), Rgb::new(55, 230, 200));
}

#[test]
fn test_color_strips_qualifier_and_arguments() {
    assert_eq!(
        frame_color(&FrameLabel::new("libpthread.so`pthread_join(pthread_t)")),
        frame_color(&FrameLabel::new("pthread_join"))
    );
}
