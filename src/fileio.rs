//src/fileio.rs

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::types::AccessMode;

/// Open a tab-separated input, going through gzip when `mode` says so.
pub fn open_reader<P: AsRef<Path>>(path: P, mode: AccessMode) -> std::io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let f = File::open(path)?;

    let is_gz = mode.is_gzip(&path.to_string_lossy());
    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(reader)
}

/// Create a gzip-compressed output file. Call `finish()` on the result
/// so trailer write errors are not lost on drop.
pub fn create_gz_writer<P: AsRef<Path>>(path: P) -> std::io::Result<GzEncoder<BufWriter<File>>> {
    let f = File::create(path)?;
    Ok(GzEncoder::new(BufWriter::new(f), Compression::default()))
}

/// Read one line into `buf` without its line terminator.
/// Returns `false` at EOF.
pub fn read_tsv_line(reader: &mut dyn BufRead, buf: &mut String) -> std::io::Result<bool> {
    buf.clear();
    if reader.read_line(buf)? == 0 {
        return Ok(false);
    }
    let trimmed = buf.trim_end_matches(['\n', '\r']).len();
    buf.truncate(trimmed);
    Ok(true)
}

/// Write `fields` as one tab-separated line.
pub fn write_tsv_row<W: Write, S: AsRef<str>>(out: &mut W, fields: &[S]) -> std::io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.write_all(b"\t")?;
        }
        out.write_all(field.as_ref().as_bytes())?;
    }
    out.write_all(b"\n")
}
