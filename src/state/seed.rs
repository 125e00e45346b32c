// Demo catalogue written on first start
use super::models::Artwork;

fn artwork(
    id: u64,
    title: &str,
    artist: &str,
    year: i32,
    genre: &str,
    description: &str,
    image: &str,
    featured: bool,
    price: f64,
) -> Artwork {
    Artwork {
        id,
        title: title.to_string(),
        artist: artist.to_string(),
        year,
        genre: genre.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        featured,
        price,
    }
}

pub fn demo_catalog() -> Vec<Artwork> {
    vec![
        artwork(
            1,
            "Starry Night",
            "Vincent Van Gogh",
            1889,
            "Post-Impressionism",
            "A swirling night sky over a quiet town, painted from memory.",
            "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=400&h=300&fit=crop",
            true,
            45_000_000.0,
        ),
        artwork(
            2,
            "The Persistence of Memory",
            "Salvador Dalí",
            1931,
            "Surrealism",
            "Melting clocks in a dreamlike landscape.",
            "https://images.unsplash.com/photo-1541961017774-22349e4a1262?w=400&h=300&fit=crop",
            true,
            35_000_000.0,
        ),
        artwork(
            3,
            "Girl with a Pearl Earring",
            "Johannes Vermeer",
            1665,
            "Baroque",
            "Portrait of a girl wearing an exotic dress and large pearl earring.",
            "https://images.unsplash.com/photo-1541961017774-22349e4a1262?w=400&h=300&fit=crop",
            false,
            30_000_000.0,
        ),
        artwork(
            4,
            "The Scream",
            "Edvard Munch",
            1893,
            "Expressionism",
            "An agonized figure against a blood-red sky.",
            "https://images.unsplash.com/photo-1579783902614-a3fb3927b6a5?w=400&h=300&fit=crop",
            false,
            120_000_000.0,
        ),
        artwork(
            5,
            "Guernica",
            "Pablo Picasso",
            1937,
            "Cubism",
            "Powerful anti-war painting depicting the bombing of Guernica.",
            "https://images.unsplash.com/photo-1544787219-7f47ccb76574?w=400&h=300&fit=crop",
            true,
            200_000_000.0,
        ),
        artwork(
            6,
            "The Night Watch",
            "Rembrandt",
            1642,
            "Baroque",
            "Militia company marching out, led by Captain Frans Banninck Cocq.",
            "https://images.unsplash.com/photo-1542204165-65bf26472b9b?w=400&h=300&fit=crop",
            false,
            50_000_000.0,
        ),
    ]
}
