use std::{io::Write, path::Path};

/// Reads one keyword per line, in file order. Empty lines are kept as empty keywords.
///
/// Any Unicode line boundary ends a line (see [`split_lines`]).
///
/// A missing or non UTF-8 file is logged and yields an empty list.
pub fn load<P: AsRef<Path>>(path: P) -> Vec<String> {
    let path = path.as_ref();
    crate::info!("Reading keywords from {}", path.display());
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let keywords: Vec<String> = split_lines(&content).map(str::to_string).collect();
            crate::info!("Read {} keywords", keywords.len());
            keywords
        }
        Err(e) => {
            crate::error!("Failed to read keyword file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits on every line boundary, counting `\r\n` as one. A final terminator
/// does not produce a trailing empty line.
pub fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some((at, c)) = rest.char_indices().find(|&(_, c)| is_line_boundary(c)) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..at];
        let mut next = at + c.len_utf8();
        if c == '\r' && rest[next..].starts_with('\n') {
            next += 1;
        }
        rest = &rest[next..];
        Some(line)
    })
}

/// Writes each keyword as one `\n` terminated line, replacing the file.
///
/// The lines go to a temporary file next to `path` which is renamed over it
/// once fully written, so a failed write leaves any previous file in place.
/// Errors are logged before being returned.
pub fn save<P: AsRef<Path>>(path: P, keywords: &[String]) -> crate::Result<()> {
    let path = path.as_ref();
    crate::info!("Writing filtered keywords to {}", path.display());
    write_lines(path, keywords)
        .map(|()| crate::info!("Wrote {} keywords", keywords.len()))
        .inspect_err(|e| crate::error!("Failed to write {}: {}", path.display(), e))
}

fn write_lines(path: &Path, keywords: &[String]) -> crate::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = std::io::BufWriter::new(file.as_file_mut());
        for kw in keywords {
            writer.write_all(kw.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }
    file.persist(path)?;
    Ok(())
}
