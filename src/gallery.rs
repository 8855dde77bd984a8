use std::path::Path;

use anyhow::Context as _;

use crate::error::StencilResult;

/// Gallery layout knobs; defaults match the reference gallery.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GalleryOptions {
    /// Directory (relative to the page) the image links point into.
    pub image_dir: String,
    /// Rendered width of each image cell, in pixels.
    pub image_width: u32,
    /// Images per table row.
    pub per_row: usize,
    /// Prefix stripped from filenames to produce captions.
    pub filename_prefix: String,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            image_dir: "cats".to_string(),
            image_width: 200,
            per_row: 3,
            filename_prefix: "cat_sitting_".to_string(),
        }
    }
}

/// Chunk `items` into rows of at most `per_row`, preserving order.
pub fn group_rows<T: Clone>(items: &[T], per_row: usize) -> Vec<Vec<T>> {
    items.chunks(per_row.max(1)).map(<[T]>::to_vec).collect()
}

fn caption_name<'a>(filename: &'a str, prefix: &str) -> &'a str {
    let stem = filename.strip_suffix(".png").unwrap_or(filename);
    stem.strip_prefix(prefix).unwrap_or(stem)
}

/// One three-line markdown table for a single row of filenames.
///
/// Image cells on top, a center-justification row, then caption links. Empty
/// input yields an empty string.
pub fn gallery_table(filenames: &[String], opts: &GalleryOptions) -> String {
    if filenames.is_empty() {
        return String::new();
    }

    let image_row: Vec<String> = filenames
        .iter()
        .map(|f| {
            format!(
                r#"<img src="{}/{}" width="{}" />"#,
                opts.image_dir, f, opts.image_width
            )
        })
        .collect();
    let justify_row: Vec<&str> = filenames.iter().map(|_| ":--:").collect();
    let caption_row: Vec<String> = filenames
        .iter()
        .map(|f| {
            format!(
                "[{}]({}/{})",
                caption_name(f, &opts.filename_prefix),
                opts.image_dir,
                f
            )
        })
        .collect();

    format!(
        "|{}|\n|{}|\n|{}|\n",
        image_row.join("|"),
        justify_row.join("|"),
        caption_row.join("|")
    )
}

/// Full gallery: all filenames grouped into rows, one table per row.
pub fn render_gallery(filenames: &[String], opts: &GalleryOptions) -> String {
    group_rows(filenames, opts.per_row)
        .iter()
        .map(|row| gallery_table(row, opts))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Enumerate `*.png` filenames in a directory, sorted, case-sensitive suffix.
pub fn list_png_files(dir: &Path) -> StencilResult<Vec<String>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read gallery dir '{}'", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read gallery dir '{}'", dir.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(".png") {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> GalleryOptions {
        GalleryOptions::default()
    }

    #[test]
    fn empty_gallery_is_empty() {
        assert_eq!(gallery_table(&[], &opts()), "");
        assert_eq!(render_gallery(&[], &opts()), "");
    }

    #[test]
    fn single_row_has_three_lines() {
        let files = vec!["cat_sitting_Tom.png".to_string()];
        let table = gallery_table(&files, &opts());
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains(r#"<img src="cats/cat_sitting_Tom.png" width="200" />"#));
        assert!(table.contains("|:--:|"));
        assert!(table.contains("[Tom](cats/cat_sitting_Tom.png)"));
    }

    #[test]
    fn four_files_split_three_then_one() {
        let files: Vec<String> = ["a", "b", "c", "d"]
            .iter()
            .map(|n| format!("cat_sitting_{n}.png"))
            .collect();
        let rows = group_rows(&files, 3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 1);

        let gallery = render_gallery(&files, &opts());
        assert_eq!(gallery.matches("<img ").count(), 4);
    }

    #[test]
    fn caption_keeps_stem_when_prefix_absent() {
        assert_eq!(caption_name("tom.png", "cat_sitting_"), "tom");
        assert_eq!(caption_name("cat_sitting_Ana.png", "cat_sitting_"), "Ana");
    }
}
