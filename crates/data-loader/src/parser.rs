//! Parsers for the catalog input files.
//!
//! - title.basics.tsv: tconst, titleType, primaryTitle, startYear, genres
//! - title.crew.tsv: tconst, writers
//! - title.principals.tsv: nconst, job
//! - name.basics.tsv: nconst, primaryName
//! - titles.csv: Title, Name, Genre, Date of creation/publication
//!
//! The IMDb dumps are tab-separated with a header row and use `\N` for
//! missing values. The book export is RFC 4180 CSV where an empty cell is a
//! missing value. Columns are located by header name, extra columns are
//! ignored.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;
use tracing::{debug, warn};

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Map the requested column names to their positions in a header row
fn column_positions(file: &str, header: &[&str], columns: &[&str]) -> Result<Vec<usize>> {
    columns
        .iter()
        .map(|column| {
            header
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| DataLoadError::MissingColumn {
                    file: file.to_string(),
                    column: column.to_string(),
                })
        })
        .collect()
}

/// Pick the requested fields out of a row, in the requested order
fn select_fields<'a>(
    file: &str,
    line: usize,
    fields: &[&'a str],
    positions: &[usize],
) -> Result<Vec<&'a str>> {
    positions
        .iter()
        .map(|&pos| {
            fields
                .get(pos)
                .copied()
                .ok_or_else(|| DataLoadError::FieldCountMismatch {
                    file: file.to_string(),
                    expected: pos + 1,
                    found: fields.len(),
                    line,
                })
        })
        .collect()
}

/// Stream a TSV file, calling `row` with the selected columns of each
/// non-empty data line. Line numbers are 1-based and count the header.
fn for_each_tsv_row<F>(path: &Path, columns: &[&str], mut row: F) -> Result<()>
where
    F: FnMut(usize, &[&str]) -> Result<()>,
{
    let file = file_label(path);
    let mut lines = BufReader::new(open(path)?).split(b'\n');

    let header = match lines.next() {
        Some(bytes) => String::from_utf8_lossy(&bytes?).trim_end_matches('\r').to_string(),
        None => {
            return Err(DataLoadError::ParseError {
                file,
                line: 1,
                reason: "Missing header row".to_string(),
            });
        }
    };
    let header_fields: Vec<&str> = header.split('\t').collect();
    let positions = column_positions(&file, &header_fields, columns)?;

    for (idx, bytes) in lines.enumerate() {
        let line_no = idx + 2;
        let bytes = bytes?;
        let line = String::from_utf8_lossy(&bytes);
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let selected = select_fields(&file, line_no, &fields, &positions)?;
        row(line_no, &selected)?;
    }
    Ok(())
}

/// `None` for the missing marker, the raw value otherwise
fn present(field: &str) -> Option<&str> {
    if field == MISSING_MARKER { None } else { Some(field) }
}

/// Parse title.basics.tsv
///
/// Rows without genres are skipped: a loaded film always has at least one.
pub fn parse_films(path: &Path) -> Result<Vec<Film>> {
    let mut films = Vec::new();
    let mut skipped = 0usize;

    for_each_tsv_row(
        path,
        &["tconst", "titleType", "primaryTitle", "startYear", "genres"],
        |_, fields| {
            let genres: std::collections::BTreeSet<String> = present(fields[4])
                .map(|raw| {
                    raw.split(FILM_GENRE_DELIMITER)
                        .filter(|g| !g.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            if genres.is_empty() {
                skipped += 1;
                return Ok(());
            }
            films.push(Film {
                id: fields[0].to_string(),
                title_type: fields[1].to_string(),
                title: fields[2].to_string(),
                year: parse_year(fields[3]),
                genres,
            });
            Ok(())
        },
    )?;

    if skipped > 0 {
        warn!("Skipped {} titles without genres in {}", skipped, file_label(path));
    }
    Ok(films)
}

/// Parse title.crew.tsv
///
/// Format: `tconst  writers` where writers is `\N` or a comma-separated list
/// of person ids.
pub fn parse_credit_links(path: &Path) -> Result<Vec<CreditLink>> {
    let mut links = Vec::new();

    for_each_tsv_row(path, &["tconst", "writers"], |_, fields| {
        let ids: Vec<PersonId> = present(fields[1])
            .map(|raw| {
                raw.split(',')
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let writers = if ids.is_empty() {
            WriterCredits::Original
        } else {
            WriterCredits::Writers(ids)
        };
        links.push(CreditLink {
            film_id: fields[0].to_string(),
            writers,
        });
        Ok(())
    })?;

    Ok(links)
}

/// Parse title.principals.tsv
///
/// Only rows with a job description are kept.
pub fn parse_credits(path: &Path) -> Result<Vec<Credit>> {
    let mut credits = Vec::new();

    for_each_tsv_row(path, &["nconst", "job"], |_, fields| {
        if let Some(job) = present(fields[1]) {
            credits.push(Credit {
                person_id: fields[0].to_string(),
                job: job.to_string(),
            });
        }
        Ok(())
    })?;

    Ok(credits)
}

/// Parse name.basics.tsv
pub fn parse_persons(path: &Path) -> Result<Vec<Person>> {
    let mut persons = Vec::new();

    for_each_tsv_row(path, &["nconst", "primaryName"], |line_no, fields| {
        match present(fields[1]) {
            Some(name) if !name.is_empty() => persons.push(Person {
                id: fields[0].to_string(),
                name: name.to_string(),
            }),
            _ => debug!("Person {} without a name at line {}", fields[0], line_no),
        }
        Ok(())
    })?;

    Ok(persons)
}

/// Parse titles.csv, the book export
pub fn parse_books(path: &Path) -> Result<Vec<Book>> {
    let file = file_label(path);
    let mut bytes = Vec::new();
    open(path)?.read_to_end(&mut bytes)?;
    let content = String::from_utf8_lossy(&bytes);

    let mut records = CsvRecords::new(&content);
    let header = records.next().ok_or_else(|| DataLoadError::ParseError {
        file: file.clone(),
        line: 1,
        reason: "Missing header row".to_string(),
    })?;
    let header_fields: Vec<&str> = header.fields.iter().map(String::as_str).collect();
    let positions = column_positions(
        &file,
        &header_fields,
        &["Title", "Name", "Genre", "Date of creation/publication"],
    )?;

    let mut books = Vec::new();
    for record in records {
        if record.fields.len() == 1 && record.fields[0].is_empty() {
            continue;
        }
        let fields: Vec<&str> = record.fields.iter().map(String::as_str).collect();
        let selected = select_fields(&file, record.line, &fields, &positions)?;

        let Some(title) = csv_present(selected[0]) else {
            debug!("Book without a title at line {}", record.line);
            continue;
        };
        books.push(Book {
            title: title.to_string(),
            author: csv_present(selected[1]).map(str::to_string),
            genre: csv_present(selected[2]).map(str::to_string),
            year: csv_present(selected[3]).and_then(parse_year),
        });
    }
    Ok(books)
}

/// Empty cells and the missing marker are both missing in the book export
fn csv_present(field: &str) -> Option<&str> {
    if field.is_empty() { None } else { present(field) }
}

/// One CSV record and the line it starts on
#[derive(Debug, PartialEq)]
struct CsvRecord {
    line: usize,
    fields: Vec<String>,
}

/// Iterator over RFC 4180 records: quoted fields may contain commas,
/// doubled quotes and line breaks.
struct CsvRecords<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> CsvRecords<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }
}

impl Iterator for CsvRecords<'_> {
    type Item = CsvRecord;

    fn next(&mut self) -> Option<CsvRecord> {
        self.chars.peek()?;

        let start_line = self.line;
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;

        while let Some(c) = self.chars.next() {
            match c {
                '"' if in_quotes => {
                    if self.chars.peek() == Some(&'"') {
                        self.chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '"' if field.is_empty() => in_quotes = true,
                ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
                '\n' => {
                    self.line += 1;
                    if in_quotes {
                        field.push('\n');
                    } else {
                        break;
                    }
                }
                '\r' if !in_quotes && self.chars.peek() == Some(&'\n') => {}
                _ => field.push(c),
            }
        }
        fields.push(field);

        Some(CsvRecord {
            line: start_line,
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(input: &str) -> Vec<Vec<String>> {
        CsvRecords::new(input).map(|r| r.fields).collect()
    }

    #[test]
    fn test_csv_plain_and_quoted_fields() {
        let rows = records("a,b,c\r\n\"x, y\",\"say \"\"hi\"\"\",\n");
        assert_eq!(rows[0], vec!["a", "b", "c"]);
        assert_eq!(rows[1], vec!["x, y", "say \"hi\"", ""]);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_csv_line_break_inside_quotes() {
        let parsed: Vec<CsvRecord> = CsvRecords::new("\"two\nlines\",1\nnext,2").collect();
        assert_eq!(parsed[0].fields, vec!["two\nlines", "1"]);
        assert_eq!(parsed[0].line, 1);
        assert_eq!(parsed[1].fields, vec!["next", "2"]);
        assert_eq!(parsed[1].line, 3);
    }

    #[test]
    fn test_column_positions() {
        let header = ["tconst", "titleType", "primaryTitle"];
        assert_eq!(
            column_positions("f", &header, &["primaryTitle", "tconst"]).unwrap(),
            vec![2, 0]
        );
        assert!(matches!(
            column_positions("f", &header, &["genres"]),
            Err(DataLoadError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_missing_markers() {
        assert_eq!(present(MISSING_MARKER), None);
        assert_eq!(present(""), Some(""));
        assert_eq!(csv_present(""), None);
        assert_eq!(csv_present(MISSING_MARKER), None);
        assert_eq!(csv_present("1865"), Some("1865"));
    }
}
