//! Trunk post-build hook: make the staged page load its bundle relative to itself
//! so the scene can be served from any sub-path or embedded in an iframe.
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

const HTML_NAME: &str = "railway-scene.html";
const BUNDLE_FILES: [&str; 2] = ["railway-scene.js", "railway-scene_bg.wasm"];

fn main() {
    //  Environment variable parameter - the distributed directory
    let Ok(staging_dir) = env::var("TRUNK_STAGING_DIR") else {
        eprintln!("TRUNK_STAGING_DIR is not set; run this through trunk");
        process::exit(1);
    };
    let staged_html_path = PathBuf::from(staging_dir).join(HTML_NAME);

    let html = match fs::read_to_string(&staged_html_path) {
        Ok(html) => html,
        Err(error) => {
            eprintln!("Cannot read {}: {error}", staged_html_path.display());
            process::exit(1);
        }
    };

    let html = BUNDLE_FILES.iter().fold(html, |html, file| {
        html.replace(&format!("/{file}"), &format!("./{file}"))
    });

    if let Err(error) = fs::write(&staged_html_path, html) {
        eprintln!("Cannot write {}: {error}", staged_html_path.display());
        process::exit(1);
    }
}
