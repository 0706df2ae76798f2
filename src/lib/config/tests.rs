use super::AssetContext;

#[test]
fn mount_path_drops_trailing_slash() {
    assert_eq!(AssetContext::new("/blog/").script_name, "/blog");
    assert_eq!(AssetContext::new("/").script_name, "");
    assert_eq!(AssetContext::default().script_name, "");
}
