use ratatui::style::Color;

use crate::fs::DirEntry;

pub struct FileIcon {
  pub glyph: &'static str,
  pub color: Color,
}

pub fn entry_icon(entry: &DirEntry) -> FileIcon {
  if entry.target.is_some() {
    return match entry.name.as_str() {
      "Downloads" => FileIcon { glyph: "\u{f01da} ", color: Color::Indexed(75) }, // 󰇚
      "Desktop" => FileIcon { glyph: "\u{f108} ", color: Color::Indexed(75) },    //
      _ => FileIcon { glyph: "\u{f0a0} ", color: Color::Indexed(248) },           //
    };
  }
  if entry.is_dir {
    return FileIcon { glyph: "\u{f114} ", color: Color::Indexed(75) }; //
  }

  let ext = entry
    .name
    .rsplit_once('.')
    .map(|(_, e)| e.to_lowercase())
    .unwrap_or_default();
  match ext.as_str() {
    "jpg" | "jpeg" | "png" | "gif" | "webp" | "heic" | "bmp" | "dng" =>
      FileIcon { glyph: "\u{f1c5} ", color: Color::Indexed(176) }, //
    "mp4" | "mkv" | "mov" | "webm" | "3gp" | "avi" =>
      FileIcon { glyph: "\u{f1c8} ", color: Color::Indexed(208) }, //
    "mp3" | "m4a" | "flac" | "ogg" | "opus" | "wav" | "aac" =>
      FileIcon { glyph: "\u{f1c7} ", color: Color::Indexed(114) }, //
    "zip" | "tar" | "gz" | "7z" | "rar" | "xz" =>
      FileIcon { glyph: "\u{f1c6} ", color: Color::Indexed(214) }, //
    "apk" | "aab" => FileIcon { glyph: "\u{f17b} ", color: Color::Indexed(114) }, //
    "pdf" => FileIcon { glyph: "\u{f1c1} ", color: Color::Indexed(167) }, //
    "txt" | "md" | "log" | "json" | "xml" | "csv" =>
      FileIcon { glyph: "\u{f15c} ", color: Color::Indexed(252) }, //
    _ => FileIcon { glyph: "\u{f15b} ", color: Color::Indexed(248) }, //
  }
}
