use super::*;

#[test]
fn builtin_chrome_resolves_every_name() {
    let table = AssetTable::with_builtin_chrome().unwrap();
    assert_eq!(table.len(), names::CHROME.len());
    let chrome = ChromeAssets::resolve(&table).unwrap();
    assert_eq!((chrome.top_left.width(), chrome.top_left.height()), (10, 10));
    assert_eq!((chrome.top.width(), chrome.top.height()), (1, 10));
    assert_eq!((chrome.left.width(), chrome.left.height()), (10, 1));
    assert!(chrome.void_texture.is_opaque());
}

#[test]
fn shadows_are_darkest_at_the_outer_edge() {
    let table = AssetTable::with_builtin_chrome().unwrap();
    let top = table.get(names::BORDER_TOP).unwrap();
    let alpha_at = |y: usize| top.rgba8_premul()[y * 4 + 3];
    assert!(alpha_at(0) > alpha_at(5));
    assert_eq!(alpha_at(9), shadow_alpha(9));

    let right = table.get(names::BORDER_RIGHT).unwrap();
    let px = right.rgba8_premul();
    assert!(px[9 * 4 + 3] > px[3]);
}

#[test]
fn builtin_chrome_keeps_caller_overrides() {
    let mut table = AssetTable::new();
    let custom = RasterImage::solid(3, 3, [0, 0, 0, 255]).unwrap();
    table.insert(names::VOID_TEXTURE, custom.clone());
    table.insert_builtin_chrome().unwrap();
    assert_eq!(table.get(names::VOID_TEXTURE).unwrap().id(), custom.id());
}

#[test]
fn missing_names_are_asset_errors() {
    let table = AssetTable::new();
    let err = ChromeAssets::resolve(&table).unwrap_err();
    assert!(err.to_string().contains("unknown asset 'border/top_left'"));
}

#[test]
fn load_files_reads_nested_png_paths() {
    let dir = std::path::PathBuf::from("target").join("asset_table_load");
    std::fs::create_dir_all(dir.join("border")).unwrap();
    let img = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
    img.save(dir.join("border").join("top.png")).unwrap();

    let mut table = AssetTable::new();
    table.load_files(&dir, [names::BORDER_TOP]).unwrap();
    let loaded = table.get(names::BORDER_TOP).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (2, 1));

    assert!(table.load_files(&dir, ["missing"]).is_err());
}
