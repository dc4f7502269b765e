use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::{Rgba, RgbaImage};
use tilesheet::{
    Background, NoopObserver, PackObserver, PackOptions, TilesheetError, collect_tile_paths, pack,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tilesheet-it-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write `count` solid tiles named 00.png, 01.png, ... into `dir/tiles`
fn write_tiles(dir: &Path, count: u8, size: u32) -> PathBuf {
    let tiles = dir.join("tiles");
    fs::create_dir_all(&tiles).unwrap();
    for i in 0..count {
        RgbaImage::from_pixel(size, size, Rgba([i * 20 + 10, 100, 200, 255]))
            .save(tiles.join(format!("{i:02}.png")))
            .unwrap();
    }
    tiles
}

#[derive(Default)]
struct Recorder {
    replaced: Mutex<Vec<PathBuf>>,
}

impl PackObserver for Recorder {
    fn output_replaced(&self, path: &Path) {
        self.replaced.lock().unwrap().push(path.to_path_buf());
    }
}

#[test]
fn packs_directory_into_grid() {
    let dir = scratch_dir("grid");
    let tiles = write_tiles(&dir, 6, 100);
    let output = dir.join("tilesheet.png");

    let paths = collect_tile_paths(&tiles, "png").unwrap();
    let options = PackOptions {
        max_width: 300,
        name_base: Some(tiles.clone()),
        ..PackOptions::default()
    };
    let report = pack(&paths, &output, &options, &NoopObserver).unwrap();

    assert_eq!(report.tile_count(), 6);
    assert_eq!(report.output, output);

    let sheet = image::open(&output).unwrap().into_rgba8();
    assert_eq!(sheet.dimensions(), (300, 200));
    assert_eq!(sheet.get_pixel(10, 10)[0], 10);
    assert_eq!(sheet.get_pixel(10, 110)[0], 70);
    assert_eq!(sheet.get_pixel(210, 110)[0], 110);

    let names: Vec<_> = report.atlas.tiles.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["00.png", "01.png", "02.png", "03.png", "04.png", "05.png"]);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = scratch_dir("idempotent");
    let tiles = write_tiles(&dir, 7, 16);
    let paths = collect_tile_paths(&tiles, "png").unwrap();
    let options = PackOptions {
        padding: 1,
        max_width: 64,
        ..PackOptions::default()
    };

    let first = dir.join("first.png");
    let second = dir.join("second.png");
    pack(&paths, &first, &options, &NoopObserver).unwrap();
    pack(&paths, &second, &options, &NoopObserver).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn rerun_replaces_previous_output() {
    let dir = scratch_dir("overwrite");
    let tiles = write_tiles(&dir, 4, 8);
    let paths = collect_tile_paths(&tiles, "png").unwrap();
    let output = dir.join("sheet.png");

    // A larger stale sheet at the output path
    RgbaImage::from_pixel(64, 64, Rgba([1, 2, 3, 255]))
        .save(&output)
        .unwrap();

    let recorder = Recorder::default();
    pack(&paths, &output, &PackOptions::default(), &recorder).unwrap();

    assert_eq!(recorder.replaced.into_inner().unwrap(), [output.clone()]);
    let sheet = image::open(&output).unwrap().into_rgba8();
    assert_eq!(sheet.dimensions(), (32, 8));
    assert!(sheet.pixels().all(|p| p[0] != 1 || p[1] != 2));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn empty_input_writes_nothing() {
    let dir = scratch_dir("empty");
    let tiles = dir.join("tiles");
    fs::create_dir_all(&tiles).unwrap();
    fs::write(tiles.join("readme.txt"), "no tiles here").unwrap();
    let output = dir.join("sheet.png");

    let paths = collect_tile_paths(&tiles, "png").unwrap();
    assert!(paths.is_empty());

    let err = pack(&paths, &output, &PackOptions::default(), &NoopObserver).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TilesheetError>(),
        Some(TilesheetError::NoTiles)
    ));
    assert!(!output.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn size_mismatch_keeps_existing_output() {
    let dir = scratch_dir("mismatch");
    let tiles = write_tiles(&dir, 3, 8);
    RgbaImage::new(9, 8).save(tiles.join("99.png")).unwrap();
    let output = dir.join("sheet.png");
    fs::write(&output, b"previous").unwrap();

    let paths = collect_tile_paths(&tiles, "png").unwrap();
    let err = pack(&paths, &output, &PackOptions::default(), &NoopObserver).unwrap_err();

    match err.downcast_ref::<TilesheetError>() {
        Some(TilesheetError::SizeMismatch { path, .. }) => {
            assert_eq!(path, &tiles.join("99.png"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(fs::read(&output).unwrap(), b"previous");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn corrupt_tile_keeps_existing_output() {
    let dir = scratch_dir("corrupt");
    let tiles = write_tiles(&dir, 2, 8);
    fs::write(tiles.join("05.png"), b"garbage").unwrap();
    let output = dir.join("sheet.png");
    fs::write(&output, b"previous").unwrap();

    let paths = collect_tile_paths(&tiles, "png").unwrap();
    let err = pack(&paths, &output, &PackOptions::default(), &NoopObserver).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<TilesheetError>(),
        Some(TilesheetError::ImageLoad { .. })
    ));
    assert_eq!(fs::read(&output).unwrap(), b"previous");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn writes_metadata_and_background() {
    let dir = scratch_dir("metadata");
    let tiles = write_tiles(&dir, 3, 10);
    let paths = collect_tile_paths(&tiles, "png").unwrap();
    let output = dir.join("out/sheet.png");
    let metadata = dir.join("out/sheet.json");

    let options = PackOptions {
        max_width: 24,
        padding: 1,
        background: Background::WHITE,
        metadata: Some(metadata.clone()),
        name_base: Some(tiles.clone()),
        ..PackOptions::default()
    };
    pack(&paths, &output, &options, &NoopObserver).unwrap();

    let sheet = image::open(&output).unwrap().into_rgba8();
    assert_eq!(sheet.dimensions(), (24, 24));
    assert_eq!(*sheet.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    assert_eq!(*sheet.get_pixel(18, 18), Rgba([255, 255, 255, 255]));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&metadata).unwrap()).unwrap();
    assert_eq!(json["meta"]["image"], "sheet.png");
    assert_eq!(json["tiles"][2]["name"], "02.png");
    assert_eq!(json["tiles"][2]["frame"]["y"], 13);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn metadata_directory_is_created() {
    let dir = scratch_dir("metadata-dir");
    let tiles = write_tiles(&dir, 2, 8);
    let paths = collect_tile_paths(&tiles, "png").unwrap();
    let output = dir.join("sheet.png");
    let metadata = dir.join("missing/sub/sheet.json");

    let options = PackOptions {
        metadata: Some(metadata.clone()),
        ..PackOptions::default()
    };
    pack(&paths, &output, &options, &NoopObserver).unwrap();

    assert!(output.is_file());
    assert!(metadata.is_file());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unwritable_metadata_keeps_existing_output() {
    let dir = scratch_dir("metadata-blocked");
    let tiles = write_tiles(&dir, 2, 8);
    let paths = collect_tile_paths(&tiles, "png").unwrap();
    let output = dir.join("sheet.png");
    fs::write(&output, b"previous").unwrap();
    // A regular file where the metadata directory should go
    fs::write(dir.join("blocker"), b"").unwrap();

    let recorder = Recorder::default();
    let options = PackOptions {
        metadata: Some(dir.join("blocker/sheet.json")),
        ..PackOptions::default()
    };
    let err = pack(&paths, &output, &options, &recorder).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<TilesheetError>(),
        Some(TilesheetError::OutputWrite { .. })
    ));
    assert!(recorder.replaced.lock().unwrap().is_empty());
    assert_eq!(fs::read(&output).unwrap(), b"previous");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn compressed_output_decodes_to_same_pixels() {
    let dir = scratch_dir("compress");
    let tiles = write_tiles(&dir, 5, 12);
    let paths = collect_tile_paths(&tiles, "png").unwrap();

    let plain = dir.join("plain.png");
    let packed = dir.join("packed.png");
    pack(&paths, &plain, &PackOptions::default(), &NoopObserver).unwrap();
    let options = PackOptions {
        compress: Some(tilesheet::CompressionLevel::Level(2)),
        ..PackOptions::default()
    };
    pack(&paths, &packed, &options, &NoopObserver).unwrap();

    let a = image::open(&plain).unwrap().into_rgba8();
    let b = image::open(&packed).unwrap().into_rgba8();
    assert_eq!(a, b);

    fs::remove_dir_all(&dir).unwrap();
}
