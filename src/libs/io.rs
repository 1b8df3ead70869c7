use std::io::{self, BufRead, BufReader, BufWriter, Write};

/// Opens `input` for buffered reading; `stdin` reads standard input and a
/// `.gz` suffix is decompressed on the fly.
///
/// ```
/// use std::io::BufRead;
/// let reader = synder::reader("tests/synmap/collinear.tsv").unwrap();
/// let lines: Vec<_> = reader.lines().collect();
/// assert_eq!(lines.len(), 4);
///
/// assert!(synder::reader("tests/synmap/missing.tsv").is_err());
/// ```
pub fn reader(input: &str) -> io::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path).map_err(|why| {
            io::Error::new(why.kind(), format!("could not open {}: {}", path.display(), why))
        })?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

/// Opens `output` for buffered writing; `stdout` writes to standard output.
pub fn writer(output: &str) -> io::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        Box::new(BufWriter::new(std::fs::File::create(output)?))
    };

    Ok(writer)
}
