use anyhow::{bail, Result};
use std::io::BufRead;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
}

pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), done: false, peek_header: None }
    }

    fn read_line(&mut self) -> Result<bool> {
        self.buf.clear();
        let n = self.reader.read_line(&mut self.buf)?;
        if n == 0 {
            self.done = true;
        }
        Ok(n > 0)
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done && self.peek_header.is_none() {
            return Ok(None);
        }

        // Find header line, skipping anything before the first '>'
        let header = match self.peek_header.take() {
            Some(h) => h,
            None => loop {
                if !self.read_line()? {
                    return Ok(None);
                }
                if let Some(h) = self.buf.strip_prefix('>') {
                    break h.trim().to_string();
                }
            },
        };

        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        // Sequence lines until the next header or EOF; whitespace is dropped
        let mut seq: Vec<u8> = Vec::new();
        while self.read_line()? {
            if let Some(h) = self.buf.strip_prefix('>') {
                self.peek_header = Some(h.trim().to_string());
                break;
            }
            seq.extend(self.buf.bytes().filter(|b| !b.is_ascii_whitespace()));
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Read a reference that must hold exactly one non-empty sequence.
/// A text carries a single sentinel, so several contigs cannot share one index.
pub fn read_single_record<R: BufRead>(reader: R) -> Result<FastaRecord> {
    let mut records = FastaReader::new(reader);
    let Some(first) = records.next_record()? else {
        bail!("FASTA input contains no sequences");
    };
    if records.next_record()?.is_some() {
        bail!("FASTA input contains more than one sequence; index one reference at a time");
    }
    if first.seq.is_empty() {
        bail!("FASTA record '{}' has an empty sequence", first.id);
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_simple_fasta() {
        let data = b">chr1 first\nACgTNN\n>chr2\nAAA\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "chr1");
        assert_eq!(r1.desc.as_deref(), Some("first"));
        assert_eq!(r1.seq, b"ACgTNN");

        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.id, "chr2");
        assert_eq!(r2.desc, None);
        assert_eq!(r2.seq, b"AAA");

        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn parse_fasta_with_crlf_and_leading_junk() {
        let data = b"\n\n>chr1 desc\r\nAC G T\r\n acgt\r\n";
        let records: Vec<FastaRecord> = FastaReader::new(Cursor::new(&data[..])).map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].desc.as_deref(), Some("desc"));
        assert_eq!(records[0].seq, b"ACGTacgt");
    }

    #[test]
    fn single_record_rules() {
        assert!(read_single_record(Cursor::new(&b">a\nACGT\n"[..])).is_ok());
        assert!(read_single_record(Cursor::new(&b""[..])).is_err());
        assert!(read_single_record(Cursor::new(&b">a\nAC\n>b\nGT\n"[..])).is_err());
        assert!(read_single_record(Cursor::new(&b">a\n\n"[..])).is_err());
    }
}
