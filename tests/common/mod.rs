use std::{fs, io::Cursor, path::Path};

use image::{ImageFormat, RgbImage};

/// Writes a small jpeg, with a `DateTimeOriginal` exif tag when `date_taken` is given
/// (in exif layout, e.g. `2023:05:01 10:00:00`).
pub fn create_jpeg(
    path: &Path,
    date_taken: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    match date_taken {
        Some(date) => create_jpeg_with_dates(path, &[(exif::Tag::DateTimeOriginal, date)]),
        None => create_jpeg_with_dates(path, &[]),
    }
}

/// Writes a small jpeg carrying each of the given exif date tags.
pub fn create_jpeg_with_dates(
    path: &Path,
    dates: &[(exif::Tag, &str)],
) -> Result<(), Box<dyn std::error::Error>> {
    let img = RgbImage::new(32, 32);
    img.save_with_format(path, ImageFormat::Jpeg)?;

    if !dates.is_empty() {
        let mut bytes = fs::read(path)?;
        bytes.splice(2..2, exif_segment(dates)?);
        fs::write(path, bytes)?;
    }
    Ok(())
}

/// Builds an APP1 segment holding a tiff structure with just the given dates.
fn exif_segment(dates: &[(exif::Tag, &str)]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let fields: Vec<exif::Field> = dates
        .iter()
        .map(|(tag, date)| exif::Field {
            tag: *tag,
            ifd_num: exif::In::PRIMARY,
            value: exif::Value::Ascii(vec![date.as_bytes().to_vec()]),
        })
        .collect();
    let mut writer = exif::experimental::Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false)?;
    let tiff = tiff.into_inner();

    let length = u16::try_from(2 + 6 + tiff.len())?;
    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&length.to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);
    Ok(segment)
}
