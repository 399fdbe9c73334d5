use super::*;

#[test]
fn test_strip_variant() {
    assert_eq!(strip_variant("hyprland-git"), Some("hyprland"));
    assert_eq!(strip_variant("ripgrep-bin"), Some("ripgrep"));
    assert_eq!(strip_variant("brave-browser"), Some("brave"));
    assert_eq!(strip_variant("bat"), None);
}

#[test]
fn test_strip_variant_first_match_only() {
    // "-git" is checked before "-bin", but only a trailing suffix counts
    assert_eq!(strip_variant("foo-git-bin"), Some("foo-git"));
}

#[test]
fn test_strip_variant_keeps_bare_suffix() {
    assert_eq!(strip_variant("-dev"), None);
}
