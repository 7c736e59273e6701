use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::compare::Comparator;
use crate::error::{PersistError, Result};
use crate::level::LevelGenerator;
use crate::SkipList;

// Text store: one `<key> <value>\n` record per entry, ascending key order.
// Neither side may contain whitespace, there is no escaping.

impl<K, V, C, G> SkipList<K, V, C, G>
where
    K: Display,
    V: Display,
{
    /// Writes every entry in key order. Returns the number of records.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let mut records = 0;
        for (key, value) in self.iter() {
            writeln!(writer, "{} {}", key, value)?;
            log::trace!("dump {} {}", key, value);
            records += 1;
        }
        writer.flush()?;

        Ok(records)
    }

    /// Replaces the file at `path` with the list contents, creating missing
    /// parent directories.
    pub fn dump<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let records = create_store(path)
            .and_then(|mut writer| self.write_to(&mut writer))
            .map_err(|err| {
                log::error!("dump to {} failed: {}", path.display(), err);
                err
            })?;

        log::debug!("dumped {} records to {}", records, path.display());
        Ok(records)
    }
}

impl<K, V, C, G> SkipList<K, V, C, G>
where
    K: FromStr,
    V: FromStr,
    K::Err: Display,
    V::Err: Display,
    C: Comparator<K>,
    G: LevelGenerator,
{
    /// Upserts every record read from `reader`. Returns the number applied.
    ///
    /// Records before a malformed line stay inserted.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut records = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let (key, value) = parse_record(index + 1, &line)?;
            self.insert(key, value);
            records += 1;
        }

        Ok(records)
    }

    /// Upserts every record of the file at `path`.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let records = File::open(path)
            .map_err(PersistError::from)
            .and_then(|file| self.read_from(BufReader::new(file)))
            .map_err(|err| {
                log::error!("load from {} failed: {}", path.display(), err);
                err
            })?;

        log::debug!("loaded {} records from {}", records, path.display());
        Ok(records)
    }
}

fn create_store(path: &Path) -> Result<BufWriter<File>> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

fn parse_record<K, V>(line: usize, text: &str) -> Result<(K, V)>
where
    K: FromStr,
    V: FromStr,
    K::Err: Display,
    V::Err: Display,
{
    let mut fields = text.split_whitespace();
    let (key, value) = match (fields.next(), fields.next(), fields.next()) {
        (Some(key), Some(value), None) => (key, value),
        _ => return Err(PersistError::parse(line, "expected `<key> <value>`")),
    };

    let key = key
        .parse::<K>()
        .map_err(|e| PersistError::parse(line, format!("key {:?}: {}", key, e)))?;
    let value = value
        .parse::<V>()
        .map_err(|e| PersistError::parse(line, format!("value {:?}: {}", value, e)))?;

    Ok((key, value))
}
