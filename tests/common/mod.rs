//! Fixture site shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_yesilada-site")
}

fn write(path: &Path, bytes: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

fn write_image(path: &Path, width: u32, height: u32, format: image::ImageFormat) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbImage::from_pixel(width, height, image::Rgb([40, 110, 70]))
        .save_with_format(path, format)
        .unwrap();
}

/// Write a small site under `root`:
///
/// ```text
/// config.toml     tagline override
/// about.md
/// public/
/// ├── Dükkan.jpg
/// ├── window.svg
/// ├── robots.txt
/// └── projeler/
///     ├── 010-cati.jpg
///     ├── 020-kapi.png
///     └── 030-kaynak.mp4
/// ```
pub fn write_site(root: &Path) {
    let public = root.join("public");
    write(
        &root.join("config.toml"),
        "[site]\ntagline = \"Test Sloganı\"\n".as_bytes(),
    );
    write(&root.join("about.md"), "**Otuz yıllık** tecrübe.\n".as_bytes());
    write_image(&public.join("Dükkan.jpg"), 12, 9, image::ImageFormat::Jpeg);
    write_image(&public.join("projeler/010-cati.jpg"), 40, 30, image::ImageFormat::Jpeg);
    write_image(&public.join("projeler/020-kapi.png"), 30, 40, image::ImageFormat::Png);
    write(&public.join("projeler/030-kaynak.mp4"), b"\x00\x00\x00\x18ftypmp42");
    write(
        &public.join("window.svg"),
        br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 4 4"><rect width="4" height="4"/></svg>"#,
    );
    write(&public.join("robots.txt"), b"User-agent: *\n");
}

/// Run the binary with `--source`, `--output` and `--temp-dir` under `root`.
pub fn run(root: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .arg("--source")
        .arg(root.join("site"))
        .arg("--output")
        .arg(root.join("dist"))
        .arg("--temp-dir")
        .arg(root.join("temp"))
        .output()
        .expect("failed to run yesilada-site")
}

/// Create and build a site in `root`; returns the output directory.
pub fn build_site(root: &Path) -> PathBuf {
    write_site(&root.join("site"));
    let out = run(root, &["build"]);
    assert!(
        out.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    root.join("dist")
}
