use anyhow::{anyhow, Result};
use std::io::BufRead;

#[derive(Debug, Clone)]
pub struct FastqRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

pub struct FastqReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    line_no: usize,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), done: false, line_no: 0 }
    }

    fn line(&mut self) -> Result<Option<&str>> {
        self.buf.clear();
        let n = self.reader.read_line(&mut self.buf)?;
        self.line_no += 1;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(self.buf.trim_end()))
    }

    pub fn next_record(&mut self) -> Result<Option<FastqRecord>> {
        if self.done {
            return Ok(None);
        }

        // header line starting with '@'; blank lines between records are tolerated
        let header = loop {
            match self.line()? {
                None => {
                    self.done = true;
                    return Ok(None);
                }
                Some("") => continue,
                Some(h) => break h.to_string(),
            }
        };
        let Some(header) = header.strip_prefix('@') else {
            return Err(anyhow!("line {}: FASTQ header not starting with '@'", self.line_no));
        };
        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let seq = match self.line()? {
            Some(s) => s.as_bytes().to_vec(),
            None => return Err(anyhow!("record '{}': unexpected EOF after header", id)),
        };

        match self.line()? {
            Some(p) if p.starts_with('+') => {}
            _ => return Err(anyhow!("record '{}': missing '+' line", id)),
        }

        let qual = match self.line()? {
            Some(q) => q.as_bytes().to_vec(),
            None => return Err(anyhow!("record '{}': missing quality line", id)),
        };
        // line-wrapped records are not supported
        if qual.len() != seq.len() {
            return Err(anyhow!("record '{}': seq/qual length mismatch", id));
        }

        Ok(Some(FastqRecord { id, desc, seq, qual }))
    }
}

impl<R: BufRead> Iterator for FastqReader<R> {
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_two_records() {
        let data = b"@r1 lane1\nACGT\n+\nIIII\n\n@r2\nGG\n+r2\n##\n";
        let recs: Vec<FastqRecord> = FastqReader::new(Cursor::new(&data[..])).map(|r| r.unwrap()).collect();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id, "r1");
        assert_eq!(recs[0].desc.as_deref(), Some("lane1"));
        assert_eq!(recs[0].seq, b"ACGT");
        assert_eq!(recs[1].qual, b"##");
    }

    #[test]
    fn malformed_records() {
        let bad_header = b">r1\nACGT\n+\nIIII\n";
        assert!(FastqReader::new(Cursor::new(&bad_header[..])).next_record().is_err());
        let short_qual = b"@r1\nACGT\n+\nII\n";
        assert!(FastqReader::new(Cursor::new(&short_qual[..])).next_record().is_err());
        let no_plus = b"@r1\nACGT\nIIII\n";
        assert!(FastqReader::new(Cursor::new(&no_plus[..])).next_record().is_err());
    }
}
