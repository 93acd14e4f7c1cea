//! Item art generation
//!
//! Builds a short prompt from the item, asks an image model for a square
//! illustration, and saves it as a PNG under the image directory.

use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::ImageFormat;
use rand::Rng;

use crate::items::ItemRecord;
use crate::stage::{StageError, StageOutcome};
use super::ImageModel;

/// Upper bound on the prompt length, in characters
pub const MAX_PROMPT_CHARS: usize = 480;

/// Longest slug kept from an item name
pub const MAX_SLUG_LEN: usize = 40;

/// Longest item name embedded in the prompt
const MAX_PROMPT_NAME: usize = 80;

/// Build the art prompt from name, rarity, type, and category
pub fn art_prompt(item: &ItemRecord) -> String {
    let name: String = item.name.chars().take(MAX_PROMPT_NAME).collect();
    let prompt = format!(
        "Fantasy illustration of a Dungeons & Dragons style magic item. \
         Item name: {}. Rarity: {}. Type: {} ({}). \
         Show the item alone on a simple, dark backdrop, no text, no characters, \
         in a painterly illustration style.",
        name,
        item.rarity.name(),
        item.type_line(),
        item.category.name(),
    );
    prompt.chars().take(MAX_PROMPT_CHARS).collect()
}

/// Lowercase ASCII slug; every run of other characters becomes one `_`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    let slug = slug.trim_end_matches('_');
    if slug.is_empty() {
        "item".to_string()
    } else {
        slug.to_string()
    }
}

/// Pick `<dir>/<slug>_<suffix>.png` that doesn't exist yet
pub fn unique_image_path(dir: &Path, name: &str, rng: &mut impl Rng) -> PathBuf {
    let slug = slugify(name);
    loop {
        let suffix: u32 = rng.gen_range(0..0x100_0000);
        let path = dir.join(format!("{}_{:06x}.png", slug, suffix));
        if !path.exists() {
            return path;
        }
    }
}

/// Decode a base64 image and write it as PNG
pub fn save_image(b64: &str, dir: &Path, name: &str, rng: &mut impl Rng) -> Result<PathBuf, StageError> {
    let bytes = BASE64.decode(b64.trim())?;
    let format = image::guess_format(&bytes)?;
    // Decode before touching the disk so a corrupt payload leaves no file
    let decoded = image::load_from_memory_with_format(&bytes, format)?;

    fs::create_dir_all(dir)?;
    let path = unique_image_path(dir, name, rng);
    match format {
        ImageFormat::Png => fs::write(&path, &bytes)?,
        _ => decoded.save_with_format(&path, ImageFormat::Png)?,
    }

    Ok(path)
}

/// Run the art stage. `None` means no model is configured.
pub fn generate_art(
    model: Option<&dyn ImageModel>,
    item: &ItemRecord,
    dir: &Path,
    rng: &mut impl Rng,
) -> StageOutcome<PathBuf> {
    let Some(model) = model else {
        log::info!("Art generation skipped: no image model configured");
        return StageOutcome::skipped("🖼️ OpenAI not configured; no image generated.");
    };

    let prompt = art_prompt(item);
    let result = model
        .generate_image(&prompt)
        .and_then(|b64| save_image(&b64, dir, &item.name, rng));

    match result {
        Ok(path) => {
            log::info!("Art saved to {:?}", path);
            StageOutcome::Enhanced(path)
        }
        Err(e) => {
            log::warn!("Art generation failed: {}", e);
            StageOutcome::skipped(format!("⚠️ Image generation failed: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Ember-Forged Sword of the Sunshard"), "ember_forged_sword_of_the_sunshard");
        assert_eq!(slugify("Night's Embrace"), "night_s_embrace");
        assert_eq!(slugify("  Rare   runed/steel\\sword  "), "rare_runed_steel_sword");
        assert_eq!(slugify("Épée ✨ du Soleil"), "p_e_du_soleil");
        assert_eq!(slugify("🔥🔥🔥"), "item");
        assert_eq!(slugify(""), "item");
        assert_eq!(slugify("../../etc/passwd"), "etc_passwd");
    }

    #[test]
    fn test_slug_is_filesystem_safe() {
        for name in ["a/b", "C:\\x", "tab\tname", "日本語の剣", "x".repeat(200).as_str()] {
            let slug = slugify(name);
            assert!(!slug.is_empty());
            assert!(slug.len() <= MAX_SLUG_LEN);
            assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
            assert!(!slug.starts_with('_') && !slug.ends_with('_'));
            assert!(!slug.contains("__"));
        }
    }

    #[test]
    fn test_unique_paths_differ() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let first = unique_image_path(dir.path(), "Sword", &mut rng);
        fs::write(&first, b"x").unwrap();
        let second = unique_image_path(dir.path(), "Sword", &mut rng);
        assert_ne!(first, second);
        assert!(second.file_name().unwrap().to_str().unwrap().starts_with("sword_"));
    }

    struct FixedImage(String);

    impl ImageModel for FixedImage {
        fn name(&self) -> &str {
            "fixed"
        }

        fn generate_image(&self, _prompt: &str) -> Result<String, StageError> {
            Ok(self.0.clone())
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image::RgbaImage::new(width, height))
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn sample_item() -> ItemRecord {
        let tables = crate::data::TableSet::builtin().unwrap();
        crate::items::forge_item(&tables, &mut StdRng::seed_from_u64(17))
    }

    #[test]
    fn test_prompt_is_bounded_and_names_category() {
        let mut item = sample_item();
        let prompt = art_prompt(&item);
        assert!(prompt.contains(item.category.name()));

        item.name = "Blade ".repeat(200);
        assert!(art_prompt(&item).chars().count() <= MAX_PROMPT_CHARS);
    }

    #[test]
    fn test_truncated_png_is_skipped_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = png_bytes(64, 64);
        bytes.truncate(40);
        let model = FixedImage(BASE64.encode(&bytes));

        let outcome = generate_art(Some(&model), &sample_item(), dir.path(), &mut StdRng::seed_from_u64(2));
        assert!(outcome.is_skipped());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_valid_png_is_saved_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = png_bytes(16, 16);
        let model = FixedImage(BASE64.encode(&bytes));

        let path = generate_art(Some(&model), &sample_item(), dir.path(), &mut StdRng::seed_from_u64(2))
            .enhanced()
            .unwrap();
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_save_rejects_bad_payload() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            save_image("!!not base64!!", dir.path(), "x", &mut rng),
            Err(StageError::Base64(_))
        ));
        let garbage = BASE64.encode(b"definitely not an image");
        assert!(matches!(
            save_image(&garbage, dir.path(), "x", &mut rng),
            Err(StageError::Image(_))
        ));
    }
}
