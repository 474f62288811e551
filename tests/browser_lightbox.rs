//! Gallery lightbox tests in headless Chrome.
//!
//! Pages link assets by root-absolute URL (`/_site/...`), so the generated
//! site is served over a minimal local HTTP server rather than `file://`.
//!
//! Run with: `cargo test --test browser_lightbox -- --ignored`

mod common;

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::io::{Read as _, Write as _};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

// ===========================================================================
// Minimal static file server
// ===========================================================================

/// Decode `%XX` escapes in a request path. Malformed escapes pass through.
fn percent_decode(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let hex = bytes
            .get(i + 1..i + 3)
            .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
            .and_then(|h| std::str::from_utf8(h).ok())
            .and_then(|h| u8::from_str_radix(h, 16).ok());
        match (bytes[i], hex) {
            (b'%', Some(byte)) => {
                out.push(byte);
                i += 3;
            }
            (b, _) => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn serve_request(mut stream: std::net::TcpStream, root: &Path) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 4096];
    let n = match stream.read(&mut buf) {
        Ok(n) if n > 0 => n,
        _ => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let raw = request.split_whitespace().nth(1).unwrap_or("/");
    let path = percent_decode(raw.split('?').next().unwrap_or("/"));
    let mut file_path = root.join(path.trim_start_matches('/'));
    if file_path.is_dir() {
        file_path = file_path.join("index.html");
    }

    let (status, body, ct) = if file_path.is_file() {
        let body = std::fs::read(&file_path).unwrap_or_default();
        let ext = file_path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let ct = match ext {
            "html" => "text/html; charset=utf-8",
            "js" => "application/javascript",
            "css" => "text/css",
            "svg" => "image/svg+xml",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "mp4" => "video/mp4",
            _ => "application/octet-stream",
        };
        ("200 OK", body, ct)
    } else {
        ("404 Not Found", b"Not Found".to_vec(), "text/plain")
    };

    let header = format!(
        "HTTP/1.1 {status}\r\n\
         Content-Type: {ct}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&body);
}

/// Build the fixture site once and serve it for the whole test binary.
fn server_url() -> &'static str {
    static SERVER: OnceLock<(TempDir, String)> = OnceLock::new();
    let (_, url) = SERVER.get_or_init(|| {
        let tmp = TempDir::new().unwrap();
        let dist: PathBuf = common::build_site(tmp.path());
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let root = dist.clone();
                thread::spawn(move || serve_request(stream, &root));
            }
        });
        (tmp, url)
    });
    url
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn load_gallery() -> Arc<Tab> {
    let tab = browser().new_tab().unwrap();
    tab.navigate_to(&format!("{}/gallery", server_url()))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    tab.wait_for_element(".gallery-tile").unwrap();
    tab
}

fn eval(tab: &Tab, js: &str) -> serde_json::Value {
    tab.evaluate(js, false).unwrap().value.unwrap_or_default()
}

fn state(tab: &Tab) -> serde_json::Value {
    let raw = eval(tab, "JSON.stringify(window.__lightbox.state())");
    serde_json::from_str(raw.as_str().unwrap()).unwrap()
}

fn open_first(tab: &Tab) {
    eval(tab, "document.querySelector('.gallery-tile').click()");
}

fn eval_async(tab: &Tab, js: &str) -> serde_json::Value {
    tab.evaluate(js, true).unwrap().value.unwrap_or_default()
}

fn is_hidden(tab: &Tab) -> bool {
    eval(tab, "document.getElementById('lightbox').hidden") == true
}

/// Press at `from` on `down_sel`, move to `to`, release, then click on `up_sel`
/// the way a browser does after a mouse gesture.
fn press_and_release(tab: &Tab, down_sel: &str, up_sel: &str, from: i32, to: i32) {
    eval(
        tab,
        &format!(
            "(() => {{
                const down = document.querySelector('{down_sel}');
                const up = document.querySelector('{up_sel}');
                const opts = (x) => ({{ pointerId: 7, clientX: x, clientY: 300, bubbles: true }});
                down.dispatchEvent(new PointerEvent('pointerdown', opts({from})));
                window.dispatchEvent(new PointerEvent('pointermove', opts({to})));
                up.dispatchEvent(new PointerEvent('pointerup', opts({to})));
                up.dispatchEvent(new MouseEvent('click', {{ clientX: {to}, clientY: 300, bubbles: true }}));
            }})()"
        ),
    );
}

fn key(tab: &Tab, key: &str) {
    eval(
        tab,
        &format!("document.dispatchEvent(new KeyboardEvent('keydown', {{ key: '{key}' }}))"),
    );
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
#[ignore]
fn clicking_a_tile_opens_the_viewer() {
    let tab = load_gallery();
    assert_eq!(eval(&tab, "document.getElementById('lightbox').hidden"), true);

    open_first(&tab);

    assert_eq!(eval(&tab, "document.getElementById('lightbox').hidden"), false);
    assert_eq!(state(&tab)["active"], 0);
    assert_eq!(
        eval(&tab, "document.querySelector('[data-stage] img') !== null"),
        true
    );
}

#[test]
#[ignore]
fn arrow_keys_wrap_around() {
    let tab = load_gallery();
    let count = eval(&tab, "document.querySelectorAll('.gallery-tile').length")
        .as_u64()
        .unwrap();
    open_first(&tab);

    key(&tab, "ArrowLeft");
    assert_eq!(state(&tab)["active"].as_u64().unwrap(), count - 1);
    key(&tab, "ArrowRight");
    assert_eq!(state(&tab)["active"], 0);
}

#[test]
#[ignore]
fn wheel_zoom_is_clamped() {
    let tab = load_gallery();
    open_first(&tab);

    for _ in 0..20 {
        eval(
            &tab,
            "document.getElementById('lightbox').dispatchEvent(\
             new WheelEvent('wheel', { deltaY: -800, cancelable: true }))",
        );
    }
    assert_eq!(state(&tab)["scale"].as_f64().unwrap(), 4.0);

    for _ in 0..20 {
        eval(
            &tab,
            "document.getElementById('lightbox').dispatchEvent(\
             new WheelEvent('wheel', { deltaY: 800, cancelable: true }))",
        );
    }
    assert_eq!(state(&tab)["scale"].as_f64().unwrap(), 1.0);
}

#[test]
#[ignore]
fn short_swipe_does_not_navigate() {
    let tab = load_gallery();
    open_first(&tab);

    let swipe = |dx: i32| {
        eval(
            &tab,
            &format!(
                "(() => {{
                    const img = document.querySelector('[data-stage] img');
                    const opts = (x) => ({{ pointerId: 1, clientX: x, clientY: 300, bubbles: true }});
                    img.dispatchEvent(new PointerEvent('pointerdown', opts(600)));
                    window.dispatchEvent(new PointerEvent('pointermove', opts(600 + {dx})));
                    window.dispatchEvent(new PointerEvent('pointerup', opts(600 + {dx})));
                }})()"
            ),
        );
    };

    swipe(-30);
    assert_eq!(state(&tab)["active"], 0);
    swipe(-200);
    assert_eq!(state(&tab)["active"], 1);
}

#[test]
#[ignore]
fn escape_closes_and_detaches_keys() {
    let tab = load_gallery();
    open_first(&tab);
    key(&tab, "+");
    assert!(state(&tab)["scale"].as_f64().unwrap() > 1.0);

    key(&tab, "Escape");
    assert_eq!(eval(&tab, "document.getElementById('lightbox').hidden"), true);
    assert!(state(&tab)["active"].is_null());

    key(&tab, "ArrowRight");
    assert!(state(&tab)["active"].is_null());
    assert_eq!(state(&tab)["scale"].as_f64().unwrap(), 1.0);
}

#[test]
#[ignore]
fn backdrop_click_closes_but_media_click_does_not() {
    let tab = load_gallery();
    open_first(&tab);

    press_and_release(&tab, "[data-stage] img", "[data-stage] img", 600, 600);
    assert!(!is_hidden(&tab));

    press_and_release(&tab, "[data-stage]", "[data-stage]", 20, 20);
    assert!(is_hidden(&tab));
}

#[test]
#[ignore]
fn drag_released_on_backdrop_keeps_viewer_open() {
    let tab = load_gallery();
    open_first(&tab);
    key(&tab, "+");

    // Pan from the image and let go over the stage.
    press_and_release(&tab, "[data-stage] img", "[data-stage]", 600, 640);
    assert!(!is_hidden(&tab));
    assert_eq!(state(&tab)["active"], 0);

    // A small jitter on the backdrop still counts as a click.
    press_and_release(&tab, "[data-stage]", "[data-stage]", 20, 23);
    assert!(is_hidden(&tab));
}

#[test]
#[ignore]
fn videos_ignore_zoom() {
    let tab = load_gallery();
    eval(&tab, "document.querySelector('.gallery-tile[data-kind=video]').click()");
    assert_eq!(
        eval(&tab, "document.querySelector('[data-stage] video') !== null"),
        true
    );

    key(&tab, "+");
    eval(&tab, "document.querySelector('[data-action=zoom-in]').click()");
    eval(
        &tab,
        "document.getElementById('lightbox').dispatchEvent(\
         new WheelEvent('wheel', { deltaY: -800, cancelable: true }))",
    );
    assert_eq!(state(&tab)["scale"].as_f64().unwrap(), 1.0);
    assert_eq!(state(&tab)["x"].as_f64().unwrap(), 0.0);
}

#[test]
#[ignore]
fn non_ascii_cover_is_served() {
    let tab = load_gallery();
    let status = eval_async(&tab, "fetch('/D%C3%BCkkan.jpg').then(r => r.status)");
    assert_eq!(status, 200);
}

#[test]
fn request_paths_are_percent_decoded() {
    assert_eq!(percent_decode("/D%C3%BCkkan.jpg"), "/Dükkan.jpg");
    assert_eq!(percent_decode("/a%20b/c.png"), "/a b/c.png");
    assert_eq!(percent_decode("/plain.txt"), "/plain.txt");
    assert_eq!(percent_decode("/bad%zz%4"), "/bad%zz%4");
}

#[test]
#[ignore]
fn navbar_marks_scroll_state() {
    let tab = load_gallery();
    assert_eq!(
        eval(&tab, "document.querySelector('.site-header').classList.contains('is-scrolled')"),
        false
    );
    eval(
        &tab,
        "document.body.style.minHeight = '4000px'; window.scrollTo(0, 200); \
         window.dispatchEvent(new Event('scroll'))",
    );
    assert_eq!(
        eval(&tab, "document.querySelector('.site-header').classList.contains('is-scrolled')"),
        true
    );
}
