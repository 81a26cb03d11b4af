use std::io::{self, BufWriter, Write};

/// Writes each `(rank, value)` pair as `"{rank}. prime = {value}"`, one per
/// line. Writes are buffered and integers formatted with itoa so long
/// streams do not bottleneck on formatting. Returns the number of lines
/// written.
pub fn print_primes<W: Write>(
    stream: impl Iterator<Item = (u64, u64)>,
    out: W,
) -> io::Result<u64> {
    let mut writer = BufWriter::new(out);
    let mut itoa_buf = itoa::Buffer::new();
    let mut count = 0u64;

    for (rank, value) in stream {
        writer.write_all(itoa_buf.format(rank).as_bytes())?;
        writer.write_all(b". prime = ")?;
        writer.write_all(itoa_buf.format(value).as_bytes())?;
        writer.write_all(b"\n")?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}
