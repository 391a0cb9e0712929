//! Sample listings used for demo seeding, the static client source, and
//! tests.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::listing::Listing;

struct Sample {
    title: &'static str,
    description: &'static str,
    price: i64,
    price_text: Option<&'static str>,
    location: &'static str,
    category_id: i32,
    created_at: &'static str,
    owner_id: &'static str,
    contact_email: &'static str,
    contact_phone: &'static str,
    image: &'static str,
    is_shabbat_restricted: bool,
}

const SAMPLES: &[Sample] = &[
    Sample {
        title: "Antique Silver Menorah",
        description: "Beautiful antique silver menorah, perfect for Hanukkah. Over 100 years old with intricate detailing. In excellent condition with minimal wear.",
        price: 450,
        price_text: None,
        location: "Golders Green, London",
        category_id: 1,
        created_at: "2023-11-10T14:30:00Z",
        owner_id: "user-123",
        contact_email: "seller1@example.com",
        contact_phone: "07700 900123",
        image: "https://images.unsplash.com/photo-1607017137021-5dc7e8cd283d",
        is_shabbat_restricted: true,
    },
    Sample {
        title: "Kosher Catering Service",
        description: "Professional kosher catering service for all your events - weddings, bar/bat mitzvahs, and holidays. 20+ years of experience, fully certified.",
        price: 0,
        price_text: Some("Price varies"),
        location: "Stamford Hill, London",
        category_id: 7,
        created_at: "2023-11-08T09:15:00Z",
        owner_id: "user-456",
        contact_email: "caterer@example.com",
        contact_phone: "07700 900456",
        image: "https://images.unsplash.com/photo-1555244162-803834f70033",
        is_shabbat_restricted: true,
    },
    Sample {
        title: "Judaica Library Collection",
        description: "Extensive collection of rare Judaica books, including commentaries, history, and literature. Over 200 volumes, many out of print.",
        price: 1200,
        price_text: None,
        location: "Hendon, London",
        category_id: 4,
        created_at: "2023-11-05T16:45:00Z",
        owner_id: "user-789",
        contact_email: "bookstore@example.com",
        contact_phone: "07700 900789",
        image: "https://images.unsplash.com/photo-1507842217343-583bb7270b66",
        is_shabbat_restricted: false,
    },
    Sample {
        title: "Handmade Mezuzah Cases",
        description: "Handcrafted Jerusalem stone Mezuzah cases. Each piece unique with traditional designs. Perfect for gifts or home use.",
        price: 35,
        price_text: None,
        location: "Edgware, London",
        category_id: 1,
        created_at: "2023-11-02T11:20:00Z",
        owner_id: "user-101",
        contact_email: "artisan@example.com",
        contact_phone: "07700 900101",
        image: "https://images.unsplash.com/photo-1591560568544-3a5e09da5a59",
        is_shabbat_restricted: false,
    },
    Sample {
        title: "Passover Kitchen Rental",
        description: "Fully equipped kosher-for-Passover kitchen available for rental before and during the holiday. Includes all necessary utensils and appliances.",
        price: 200,
        price_text: Some("£200 per day"),
        location: "Borehamwood, Hertfordshire",
        category_id: 6,
        created_at: "2023-10-28T14:10:00Z",
        owner_id: "user-202",
        contact_email: "kitchen@example.com",
        contact_phone: "07700 900202",
        image: "https://images.unsplash.com/photo-1556911220-bda9f7f37f8f",
        is_shabbat_restricted: true,
    },
    Sample {
        title: "Torah Study Group",
        description: "Weekly Torah study group seeking new members. All knowledge levels welcome. We meet every Thursday evening.",
        price: 0,
        price_text: Some("Free"),
        location: "Finchley, London",
        category_id: 9,
        created_at: "2023-10-25T19:30:00Z",
        owner_id: "user-303",
        contact_email: "studygroup@example.com",
        contact_phone: "07700 900303",
        image: "https://images.unsplash.com/photo-1621866908556-4f0a371c6f24",
        is_shabbat_restricted: true,
    },
    Sample {
        title: "Vintage Tallit",
        description: "Vintage hand-woven wool tallit (prayer shawl) with silver atarah. Approximately 70 years old, from Morocco. Well preserved with beautiful craftsmanship.",
        price: 300,
        price_text: None,
        location: "Hampstead, London",
        category_id: 1,
        created_at: "2023-10-20T10:05:00Z",
        owner_id: "user-404",
        contact_email: "seller2@example.com",
        contact_phone: "07700 900404",
        image: "https://images.unsplash.com/photo-1586251655596-d0ac8a1e1ba6",
        is_shabbat_restricted: false,
    },
    Sample {
        title: "Hebrew Tutor - All Levels",
        description: "Experienced Hebrew teacher offering private lessons for all ages and levels. Modern and Biblical Hebrew. Flexible hours and online options available.",
        price: 0,
        price_text: Some("£35 per hour"),
        location: "Online / Ilford, Essex",
        category_id: 7,
        created_at: "2023-10-15T13:40:00Z",
        owner_id: "user-505",
        contact_email: "tutor@example.com",
        contact_phone: "07700 900505",
        image: "https://images.unsplash.com/photo-1503676260728-1c00da094a0b",
        is_shabbat_restricted: false,
    },
];

/// The eight-listing demo set. Ids are `00000000-0000-0000-0000-00000000000N`.
pub fn sample_listings() -> Vec<Listing> {
    SAMPLES
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let created_at: DateTime<Utc> = s
                .created_at
                .parse()
                .expect("sample timestamps are valid RFC 3339");
            Listing {
                id: Uuid::from_u128(i as u128 + 1),
                title: s.title.to_string(),
                description: s.description.to_string(),
                price: Some(Decimal::from(s.price)),
                price_text: s.price_text.map(str::to_string),
                location: s.location.to_string(),
                category_id: s.category_id,
                images: vec![s.image.to_string()],
                is_shabbat_restricted: s.is_shabbat_restricted,
                contact_email: Some(s.contact_email.to_string()),
                contact_phone: Some(s.contact_phone.to_string()),
                owner_id: s.owner_id.to_string(),
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}
