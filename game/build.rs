use std::env;
use std::error::Error;
use std::fs;
use std::io::Read;
use std::path::Path;

const FONT_PATH: &str = "../assets/DejaVuSans.ttf";
const FONT_URL: &str = "https://github.com/dejavu-fonts/dejavu-fonts/releases/download/version_2_37/dejavu-fonts-ttf-2.37.tar.bz2";

const MINIQUAD_JS_FILES: &[(&str, &str)] = &[
    (
        "../js/gl.js",
        "https://raw.githubusercontent.com/not-fl3/miniquad/master/js/gl.js",
    ),
    (
        "../js/sapp_jsutils.js",
        "https://raw.githubusercontent.com/not-fl3/sapp-jsutils/master/js/sapp_jsutils.js",
    ),
];

fn main() {
    download_font();
    download_miniquad_js();
    embed_arenas();
}

fn download_font() {
    if Path::new(FONT_PATH).exists() {
        return;
    }

    eprintln!("Downloading DejaVu Sans font...");

    // The game falls back to macroquad's built-in font, so offline builds only warn.
    if let Err(e) = try_download_font() {
        println!("cargo:warning=could not fetch {FONT_PATH}: {e}");
    }
}

fn try_download_font() -> Result<(), Box<dyn Error>> {
    let response = ureq::get(FONT_URL).call()?;

    let reader = bzip2::read::BzDecoder::new(response.into_body().into_reader());
    let mut archive = tar::Archive::new(reader);

    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?;

        if path.ends_with("DejaVuSans.ttf") {
            let mut data = Vec::new();
            entry.read_to_end(&mut data)?;

            if let Some(parent) = Path::new(FONT_PATH).parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(FONT_PATH, &data)?;

            eprintln!("Downloaded DejaVuSans.ttf");
            return Ok(());
        }
    }

    Err("DejaVuSans.ttf not found in archive".into())
}

fn download_miniquad_js() {
    for &(path, url) in MINIQUAD_JS_FILES {
        if Path::new(path).exists() {
            continue;
        }

        eprintln!("Downloading {path}...");

        match try_download(url, path) {
            Ok(()) => eprintln!("Downloaded {path}"),
            Err(e) => println!("cargo:warning=could not fetch {url}: {e}"),
        }
    }
}

fn try_download(url: &str, path: &str) -> Result<(), Box<dyn Error>> {
    let response = ureq::get(url).call()?;

    let mut data = Vec::new();
    response.into_body().into_reader().read_to_end(&mut data)?;

    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &data)?;
    Ok(())
}

fn collect_arenas(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut arenas: Vec<String> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|e| e == "csv"))
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?.to_string();
            println!("cargo:rerun-if-changed={}", path.display());
            println!(
                "cargo:rerun-if-changed={}",
                path.with_extension("json").display()
            );
            Some(stem)
        })
        .collect();
    arenas.sort();
    arenas
}

fn embed_arenas() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("arenas.rs");

    let arenas_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../arenas");

    println!("cargo:rerun-if-changed={}", arenas_dir.display());

    let arenas = collect_arenas(&arenas_dir);
    assert!(!arenas.is_empty(), "no arenas found in {}", arenas_dir.display());

    let mut code = String::new();
    code.push_str("static ARENA_DATA: &[(&str, &str, &str)] = &[\n");

    for name in &arenas {
        code.push_str(&format!(
            "    ({name:?}, include_str!(concat!(env!(\"CARGO_MANIFEST_DIR\"), \"/../arenas/{name}.csv\")), include_str!(concat!(env!(\"CARGO_MANIFEST_DIR\"), \"/../arenas/{name}.json\"))),\n",
        ));
    }

    code.push_str("];\n");

    // Only write if content changed to avoid unnecessary recompilation
    let should_write = match fs::read_to_string(&dest_path) {
        Ok(existing) => existing != code,
        Err(_) => true,
    };
    if should_write {
        fs::write(&dest_path, code).unwrap();
    }
}
