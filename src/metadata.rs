use std::path::Path;

use chrono::NaiveDate;

use crate::plan::CaptureMoment;

/// Looks up when the image at a path was captured.
///
/// Implementations never fail: a file that cannot be read, is not an image, or carries no
/// capture date simply has no moment.
pub trait MetadataSource {
    fn capture_moment(&self, path: &Path) -> Option<CaptureMoment>;
}

/// Exif tags consulted for the capture date, most preferred first.
const DATE_TAGS: [exif::Tag; 2] = [exif::Tag::DateTimeOriginal, exif::Tag::DateTimeDigitized];

/// Reads capture dates from exif metadata in any container `kamadak-exif` understands.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifReader;

impl MetadataSource for ExifReader {
    fn capture_moment(&self, path: &Path) -> Option<CaptureMoment> {
        let file = std::fs::File::open(path).ok()?;
        let mut bufreader = std::io::BufReader::new(&file);

        let exifreader = exif::Reader::new();
        let exif = exifreader.read_from_container(&mut bufreader).ok()?;

        DATE_TAGS
            .iter()
            .filter_map(|tag| exif.get_field(*tag, exif::In::PRIMARY))
            .find_map(moment_from_field)
    }
}

fn moment_from_field(field: &exif::Field) -> Option<CaptureMoment> {
    if let exif::Value::Ascii(ref values) = field.value {
        if let Some(datetime) = values
            .first()
            .and_then(|ascii| exif::DateTime::from_ascii(ascii).ok())
        {
            return moment_from_exif(&datetime);
        }
    }

    // some cameras write dates that do not follow the exif layout
    let datetime_value = field.display_value().to_string();
    let datetime_value = datetime_value.trim_matches('"');
    Some(CaptureMoment(
        dateparser::parse(datetime_value)
            .ok()?
            .with_timezone(&chrono::Local)
            .naive_local(),
    ))
}

fn moment_from_exif(datetime: &exif::DateTime) -> Option<CaptureMoment> {
    NaiveDate::from_ymd_opt(
        datetime.year.into(),
        datetime.month.into(),
        datetime.day.into(),
    )?
    .and_hms_opt(
        datetime.hour.into(),
        datetime.minute.into(),
        datetime.second.into(),
    )
    .map(CaptureMoment)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn ascii_field(tag: exif::Tag, value: &str) -> exif::Field {
        exif::Field {
            tag,
            ifd_num: exif::In::PRIMARY,
            value: exif::Value::Ascii(vec![value.as_bytes().to_vec()]),
        }
    }

    #[test]
    fn test_moment_from_exif_layout() {
        // Arrange
        let field = ascii_field(exif::Tag::DateTimeOriginal, "2023:05:01 10:00:00");

        // Act
        let got = moment_from_field(&field).map(|m| m.file_stem());

        // Assert
        assert_eq!(Some("2023-05-01_10-00-00".to_string()), got);
    }

    #[test]
    fn test_moment_from_non_exif_layout() {
        // Arrange
        let field = ascii_field(exif::Tag::DateTimeOriginal, "2021-08-20 13:30:00");

        // Act
        let got = moment_from_field(&field).map(|m| m.file_stem());

        // Assert
        assert_eq!(Some("2021-08-20_13-30-00".to_string()), got);
    }

    #[test]
    fn test_moment_from_unusable_values() {
        // Arrange
        let cases = vec![
            ascii_field(exif::Tag::DateTimeOriginal, "0000:00:00 00:00:00"),
            ascii_field(exif::Tag::DateTimeOriginal, "    :  :     :  :  "),
            ascii_field(exif::Tag::DateTimeOriginal, "not a date"),
            exif::Field {
                tag: exif::Tag::DateTimeOriginal,
                ifd_num: exif::In::PRIMARY,
                value: exif::Value::Ascii(vec![]),
            },
        ];

        // Act/Assert
        for field in cases {
            assert_eq!(None, moment_from_field(&field), "{:?}", field.value);
        }
    }

    #[test]
    fn test_exif_reader_tolerates_non_images() -> Result<(), Box<dyn std::error::Error>> {
        // Arrange
        let dir = tempdir()?;
        let fake = dir.path().join("fake.jpg");
        fs::write(&fake, b"definitely not a jpeg")?;
        let empty = dir.path().join("empty.jpg");
        fs::write(&empty, b"")?;

        // Act/Assert
        assert_eq!(None, ExifReader.capture_moment(&fake));
        assert_eq!(None, ExifReader.capture_moment(&empty));
        assert_eq!(None, ExifReader.capture_moment(&dir.path().join("missing.jpg")));
        Ok(())
    }
}
