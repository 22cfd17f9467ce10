use crate::models::{Amenity, Category, ListingDraft, ListingStatus};

/// A handful of typical listings for seeding a fresh store
pub fn sample_drafts() -> Vec<ListingDraft> {
    vec![
        ListingDraft {
            title: "Casa junto al mar".to_string(),
            description: "Casa de tres dormitorios a cinco minutos de la playa.".to_string(),
            category: Category::House,
            status: ListingStatus::ForSale,
            price: 385_000,
            bedrooms: 3,
            area_sqm: 140,
            address: "Carrer de la Reina 21".to_string(),
            city: "Valencia".to_string(),
            amenities: vec![Amenity::Terrace, Amenity::Garage, Amenity::AirConditioning],
        },
        ListingDraft {
            title: "Apartamento céntrico".to_string(),
            description: "Reformado, junto a Gran Vía. Ascensor y portero.".to_string(),
            category: Category::Apartment,
            status: ListingStatus::ForRent,
            price: 1_450,
            bedrooms: 2,
            area_sqm: 75,
            address: "Calle de Atocha 54".to_string(),
            city: "Madrid".to_string(),
            amenities: vec![Amenity::Elevator, Amenity::Furnished],
        },
        ListingDraft {
            title: "Estudio luminoso".to_string(),
            description: "Estudio exterior en el barrio de Gràcia.".to_string(),
            category: Category::Studio,
            status: ListingStatus::ForRent,
            price: 950,
            bedrooms: 0,
            area_sqm: 32,
            address: "Carrer de Verdi 8".to_string(),
            city: "Barcelona".to_string(),
            amenities: vec![Amenity::Elevator],
        },
        ListingDraft {
            title: "Ático con piscina".to_string(),
            description: "Ático de lujo con piscina privada y vistas al mar.".to_string(),
            category: Category::Apartment,
            status: ListingStatus::Reserved,
            price: 720_000,
            bedrooms: 4,
            area_sqm: 160,
            address: "Paseo Marítimo 3".to_string(),
            city: "Málaga".to_string(),
            amenities: vec![Amenity::Pool, Amenity::Terrace, Amenity::Elevator],
        },
        ListingDraft {
            title: "Local comercial".to_string(),
            description: "Local a pie de calle en zona de mucho paso.".to_string(),
            category: Category::Commercial,
            status: ListingStatus::ForSale,
            price: 210_000,
            bedrooms: 0,
            area_sqm: 95,
            address: "Avenida de la Constitución 40".to_string(),
            city: "Sevilla".to_string(),
            amenities: vec![Amenity::StorageRoom],
        },
    ]
}
