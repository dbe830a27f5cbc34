use serde_json::json;

use crate::{dataset::DatasetSource, record::TransactionRecord};

/// A handful of records shaped like the upstream dataset.
///
/// March has four records across two years, one of which has no category and
/// a non-numeric price.
pub(crate) fn sample_records() -> Vec<TransactionRecord> {
    serde_json::from_value(json!([
        {
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 329.85,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://example.com/1.jpg",
            "sold": false,
            "dateOfSale": "2021-03-27T20:29:54+05:30"
        },
        {
            "id": 2,
            "title": "Mens Casual T-Shirt",
            "price": 44.6,
            "description": "Slim-fitting style",
            "category": "men's clothing",
            "image": "https://example.com/2.jpg",
            "sold": true,
            "dateOfSale": "2022-03-05T20:29:54+05:30"
        },
        {
            "id": 3,
            "title": "Solid Gold Bracelet",
            "price": 1999,
            "description": "Dragon station chain",
            "category": "jewelery",
            "image": "https://example.com/3.jpg",
            "sold": true,
            "dateOfSale": "2022-03-11T20:29:54+05:30"
        },
        {
            "id": 4,
            "title": "Mystery Box",
            "price": "unknown",
            "description": "Nobody knows",
            "image": "https://example.com/4.jpg",
            "dateOfSale": "2022-03-15T20:29:54+05:30"
        },
        {
            "id": 5,
            "title": "WD 2TB Hard Drive",
            "price": 199,
            "description": "USB 3.0 and USB 2.0 compatibility",
            "category": "electronics",
            "image": "https://example.com/5.jpg",
            "sold": false,
            "dateOfSale": "2022-07-15T20:29:54+05:30"
        }
    ]))
    .expect("Could not deserialize sample records")
}

pub(crate) fn sample_dataset() -> DatasetSource {
    DatasetSource::from_records(sample_records())
}
