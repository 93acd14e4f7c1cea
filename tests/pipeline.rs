//! End-to-end forge runs against fake models and tools

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::SeedableRng;

use arcane_armory::ai::{ImageModel, TextModel};
use arcane_armory::display::{resize_to_height, CommandRunner, ToolError};
use arcane_armory::items::forge_item;
use arcane_armory::pipeline::{forge_enhanced, ForgeReport, Services};
use arcane_armory::render::Card;
use arcane_armory::{Config, StageError, StageOutcome, TableSet};

struct ScriptedText(Result<&'static str, u16>);

impl TextModel for ScriptedText {
    fn name(&self) -> &str {
        "test-text"
    }

    fn complete_json(&self, _system: &str, _user: &str) -> Result<String, StageError> {
        match self.0 {
            Ok(reply) => Ok(reply.to_string()),
            Err(status) => Err(StageError::Api { status, message: "boom".into() }),
        }
    }
}

struct ScriptedImage(Option<String>);

impl ImageModel for ScriptedImage {
    fn name(&self) -> &str {
        "test-image"
    }

    fn generate_image(&self, _prompt: &str) -> Result<String, StageError> {
        self.0
            .clone()
            .ok_or_else(|| StageError::Malformed("reply has no b64_json image".into()))
    }
}

/// Records calls; `magick` writes a PNG of `height` pixels to its output argument
#[derive(Default)]
struct FakeTools {
    calls: RefCell<Vec<String>>,
    magick_height: Option<u32>,
    sixel_fails: bool,
}

impl CommandRunner for FakeTools {
    fn run(&self, program: &str, args: &[OsString]) -> Result<(), ToolError> {
        self.calls.borrow_mut().push(program.to_string());
        match (program, self.magick_height) {
            ("magick", Some(height)) => {
                let dst = PathBuf::from(&args[3]);
                RgbaImage::from_pixel(height, height, Rgba([1, 2, 3, 255]))
                    .save(dst)
                    .map_err(|e| ToolError::Failed { program: program.into(), status: e.to_string() })
            }
            ("img2sixel", _) if self.sixel_fails => Err(ToolError::Failed {
                program: program.into(),
                status: "exit status: 1".into(),
            }),
            ("img2sixel", _) => Ok(()),
            _ => Err(ToolError::Missing(program.to_string())),
        }
    }
}

const GOOD_LORE: &str = r#"{
    "name": "Cinderwake",
    "enhanced_lore": "Forged in a dying star.",
    "enhanced_quirk": "Warms the hands of liars.",
    "mechanical_note": "Keep the bonus at +1."
}"#;

fn png_b64(width: u32, height: u32) -> String {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([90, 30, 160, 255])))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    BASE64.encode(bytes)
}

fn config_from(vars: &[(&str, &str)], image_dir: &Path) -> Config {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    Config {
        image_dir: image_dir.to_path_buf(),
        reveal_delay: Duration::ZERO,
        ..Config::from_lookup(|key| vars.get(key).cloned())
    }
}

fn forge(config: &Config, services: Services<'_>, seed: u64) -> ForgeReport {
    let tables = TableSet::builtin().unwrap();
    forge_enhanced(config, &tables, services, &mut StdRng::seed_from_u64(seed), &mut Vec::new()).unwrap()
}

#[test]
fn failed_lore_renders_base_card_plus_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_from(&[("OPENAI_API_KEY", "sk-test")], dir.path());
    let tools = FakeTools::default();
    let text = ScriptedText(Err(500));
    let services = Services { text: Some(&text), image: None, runner: &tools };

    let report = forge(&config, services, 21);
    let base = forge_item(&TableSet::builtin().unwrap(), &mut StdRng::seed_from_u64(21));

    assert_eq!(report.item, base);
    assert!(report.lore.is_skipped());

    let base_card = Card::new(&base, &[]).plain_lines();
    let card = report.card.plain_lines();
    assert_eq!(card.len(), base_card.len() + 1);
    assert_eq!(&card[..base_card.len()], &base_card[..]);
    assert!(card.last().unwrap().contains("Lore enhancement failed"));
}

#[test]
fn malformed_lore_is_all_or_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_from(&[], dir.path());
    let tools = FakeTools::default();
    let text = ScriptedText(Ok(r#"{"name": "Half Done", "enhanced_lore": "Only this."}"#));
    let services = Services { text: Some(&text), image: None, runner: &tools };

    let report = forge(&config, services, 4);
    assert!(report.lore.is_skipped());
    assert_ne!(report.item.name, "Half Done");
    assert_eq!(report.item.enhanced_lore, None);
    assert_eq!(report.item.enhanced_quirk, None);
    assert_eq!(report.item.mechanical_note, None);
}

#[test]
fn successful_lore_replaces_name_and_adds_gm_note() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_from(&[], dir.path());
    let tools = FakeTools::default();
    let text = ScriptedText(Ok(GOOD_LORE));
    let services = Services { text: Some(&text), image: None, runner: &tools };

    let report = forge(&config, services, 8);
    assert_eq!(report.item.name, "Cinderwake");
    assert!(report.item.is_complete());

    let card = report.card.plain_lines().join("\n");
    assert!(card.contains("Cinderwake"));
    assert!(card.contains("Forged in a dying star."));
    assert!(card.contains("Keep the bonus at +1."));
    assert!(card.contains("test-text enhancement applied"));
}

#[test]
fn failed_art_sets_no_image_and_skips_display() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_from(&[], dir.path());
    let tools = FakeTools::default();
    let image = ScriptedImage(None);
    let services = Services { text: None, image: Some(&image), runner: &tools };

    let report = forge(&config, services, 2);
    assert!(report.art.is_skipped());
    assert_eq!(report.item.image_path, None);
    assert!(report.display.is_skipped());
    assert!(tools.calls.borrow().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn no_inline_suppresses_every_tool_call() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_from(&[("DNDGEN_NO_INLINE", "YES")], dir.path());
    let tools = FakeTools::default();
    let image = ScriptedImage(Some(png_b64(64, 64)));
    let services = Services { text: None, image: Some(&image), runner: &tools };

    let report = forge(&config, services, 6);
    let saved = report.item.image_path.clone().unwrap();
    assert!(saved.exists());
    assert!(report.display.is_skipped());
    assert!(tools.calls.borrow().is_empty());
}

#[test]
fn img_height_280_via_image_library() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_from(&[("DNDGEN_IMG_HEIGHT", "280")], dir.path());
    let tools = FakeTools::default();
    let image = ScriptedImage(Some(png_b64(512, 512)));
    let services = Services { text: None, image: Some(&image), runner: &tools };

    let report = forge(&config, services, 13);
    let shown = report.display.enhanced().unwrap();

    assert!(shown.to_string_lossy().ends_with("_h280.png"));
    assert_eq!(image::open(&shown).unwrap().dimensions(), (280, 280));
    assert_eq!(*tools.calls.borrow(), vec!["img2sixel".to_string()]);
}

#[test]
fn failing_renderer_prints_one_fallback_notice() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_from(&[], dir.path());
    let tools = FakeTools { sixel_fails: true, ..FakeTools::default() };
    let image = ScriptedImage(Some(png_b64(32, 32)));
    let services = Services { text: None, image: Some(&image), runner: &tools };

    let tables = TableSet::builtin().unwrap();
    let mut out = Vec::new();
    let report = forge_enhanced(&config, &tables, services, &mut StdRng::seed_from_u64(19), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert!(report.display.is_skipped());
    assert_eq!(*tools.calls.borrow(), vec!["img2sixel".to_string()]);

    let notices: Vec<usize> = (0..lines.len())
        .filter(|&i| lines[i].contains("Inline preview unavailable"))
        .collect();
    assert_eq!(notices.len(), 1, "{}", text);

    let saved = report.item.image_path.unwrap();
    let notice = notices[0];
    assert!(lines[notice].contains(&*saved.to_string_lossy()));

    let frame_end = lines.iter().rposition(|l| l.contains('└')).unwrap();
    let tip = lines.iter().position(|l| l.contains("Tip:")).unwrap();
    assert!(frame_end < notice && notice < tip);
}

#[test]
fn img_height_280_via_resize_tool() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("unreadable_000001.png");
    std::fs::write(&src, b"the image library cannot read this").unwrap();

    let tools = FakeTools { magick_height: Some(280), ..FakeTools::default() };
    let outcome = resize_to_height(&src, 280, &tools);

    let resized = outcome.enhanced().unwrap();
    assert_eq!(resized, dir.path().join("unreadable_000001_h280.png"));
    assert_eq!(image::open(&resized).unwrap().height(), 280);
    assert_eq!(*tools.calls.borrow(), vec!["magick".to_string()]);
}

#[test]
fn missing_tools_fall_back_to_original_image() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("unreadable_000002.png");
    std::fs::write(&src, b"nope").unwrap();

    let tools = FakeTools::default();
    let outcome = resize_to_height(&src, 280, &tools);
    assert!(matches!(outcome, StageOutcome::Skipped(_)));
    assert_eq!(*tools.calls.borrow(), vec!["magick".to_string(), "convert".to_string()]);
}

#[test]
fn saved_filenames_are_safe_for_any_name() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_from(&[("DNDGEN_NO_INLINE", "1")], dir.path());
    let tools = FakeTools::default();
    let text = ScriptedText(Ok(r#"{
        "name": "../../Ráth/of \"Doom\" 🔥:*?",
        "enhanced_lore": "a", "enhanced_quirk": "b", "mechanical_note": "c"
    }"#));
    let image = ScriptedImage(Some(png_b64(8, 8)));
    let services = Services { text: Some(&text), image: Some(&image), runner: &tools };

    let report = forge(&config, services, 1);
    let saved = report.item.image_path.unwrap();

    assert_eq!(saved.parent(), Some(dir.path()));
    let file = saved.file_name().unwrap().to_str().unwrap();
    assert!(file.starts_with("r_th_of_doom_"));
    assert!(file.ends_with(".png"));
    assert!(file
        .trim_end_matches(".png")
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
}

#[test]
fn missing_credentials_still_render_card() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_from(&[("OPENAI_API_KEY", "   ")], dir.path());
    assert!(!config.has_credentials());

    let tools = FakeTools::default();
    let services = Services { text: None, image: None, runner: &tools };
    let report = forge(&config, services, 30);

    assert!(report.item.is_complete());
    assert!(report.card.plain_lines().last().unwrap().contains("not configured"));
    assert!(tools.calls.borrow().is_empty());
}
