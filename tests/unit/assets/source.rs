use super::*;

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./.").is_err());
}

#[test]
fn memory_assets_resolve_normalized_keys() {
    let assets = MemoryAssets::new().with("icons/c.svg", b"<svg/>".to_vec()).unwrap();
    assert_eq!(assets.read_bytes("./icons/c.svg").unwrap(), b"<svg/>".to_vec());
    let err = assets.read_bytes("missing.png").unwrap_err();
    assert!(matches!(err, ConcertoError::Asset(_)));
}

#[test]
fn dir_assets_report_missing_files_as_asset_errors() {
    let dir = PathBuf::from("target").join("dir_assets_unit");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("present.txt"), b"ok").unwrap();

    let assets = DirAssets::new(&dir);
    assert_eq!(assets.root(), dir.as_path());
    assert_eq!(assets.read_bytes("present.txt").unwrap(), b"ok".to_vec());
    assert!(matches!(
        assets.read_bytes("absent.txt").unwrap_err(),
        ConcertoError::Asset(_)
    ));
}

#[test]
fn font_dirs_cover_the_root_and_its_fonts_folder() {
    let assets = DirAssets::new("assets");
    assert_eq!(
        assets.font_dirs(),
        vec![PathBuf::from("assets/fonts"), PathBuf::from("assets")]
    );
    assert!(MemoryAssets::new().font_dirs().is_empty());
}
