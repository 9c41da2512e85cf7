// src/export/mod.rs
use crate::extractors::Listing;

/// Serializes the listing as CSV bytes: a `title,price,availability` header
/// row, then one record per line with the normalized price in default float
/// formatting.
pub fn write_csv(listing: &Listing) -> Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        for record in listing.iter() {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }
    Ok(buf)
}
