//! Collection Backends
//!
//! One `CollectionApi` handle per managed collection. With an API URL the
//! handles share a single REST client; without one every collection is an
//! in-memory backend seeded with demo content.

use std::rc::Rc;

use layana_core::domain::{
    Category, Faq, Location, Membership, PricingRow, SpaPackage, TeamMember, Treatment,
};
use layana_core::{ClientConfig, CollectionApi, HttpCollectionClient, MemoryBackend, Resource};

pub type Api<T> = Rc<dyn CollectionApi<T>>;

#[derive(Clone)]
pub struct Backends {
    pub treatments: Api<Treatment>,
    pub team_members: Api<TeamMember>,
    pub categories: Api<Category>,
    pub faqs: Api<Faq>,
    pub locations: Api<Location>,
    pub pricing_rows: Api<PricingRow>,
    pub memberships: Api<Membership>,
    pub spa_packages: Api<SpaPackage>,
    pub demo: bool,
}

impl Backends {
    /// REST backends when configured, demo backends otherwise
    pub fn connect(config: &ClientConfig) -> Self {
        if !config.uses_remote_api() {
            tracing::info!("no API URL configured, running on demo data");
            return Self::demo();
        }
        match HttpCollectionClient::new(config) {
            Ok(client) => {
                tracing::info!(base_url = client.base_url(), "using REST backend");
                Self::remote(client)
            }
            Err(e) => {
                tracing::warn!("REST client unavailable, falling back to demo data: {}", e);
                Self::demo()
            }
        }
    }

    fn remote(client: HttpCollectionClient) -> Self {
        let client = Rc::new(client);
        Self {
            treatments: client.clone(),
            team_members: client.clone(),
            categories: client.clone(),
            faqs: client.clone(),
            locations: client.clone(),
            pricing_rows: client.clone(),
            memberships: client.clone(),
            spa_packages: client,
            demo: false,
        }
    }

    pub fn demo() -> Self {
        Self {
            treatments: memory(demo_treatments()),
            team_members: memory(demo_team_members()),
            categories: memory(demo_categories()),
            faqs: memory(demo_faqs()),
            locations: memory(demo_locations()),
            pricing_rows: memory(demo_pricing_rows()),
            memberships: memory(demo_memberships()),
            spa_packages: memory(demo_spa_packages()),
            demo: true,
        }
    }
}

fn memory<T: Resource<Id = u32>>(rows: Vec<T>) -> Api<T> {
    Rc::new(MemoryBackend::with_rows(rows))
}

fn demo_categories() -> Vec<Category> {
    ["Massage", "Body Treatments", "Facials", "Hair & Nails"]
        .iter()
        .zip(1u32..)
        .map(|(name, i)| Category {
            id: i,
            index: i,
            name: name.to_string(),
            slug: layana_core::domain::slugify(name),
        })
        .collect()
}

fn demo_treatments() -> Vec<Treatment> {
    let rows = [
        ("Balinese Massage", "Long strokes, acupressure and stretching.", 60, 45_000_00, 1),
        ("Deep Tissue Massage", "Firm pressure for tense muscles.", 90, 62_000_00, 1),
        ("Hot Stone Therapy", "Warm basalt stones along the meridians.", 75, 58_000_00, 1),
        ("Javanese Lulur Scrub", "Turmeric and rice body polish.", 60, 40_000_00, 2),
        ("Coconut Body Wrap", "Hydrating wrap with virgin coconut oil.", 45, 35_000_00, 2),
        ("Radiance Facial", "Cleanse, exfoliate and vitamin C mask.", 50, 38_000_00, 3),
        ("Cream Bath", "Traditional hair mask and scalp massage.", 45, 25_000_00, 4),
    ];
    rows.iter()
        .zip(1u32..)
        .map(|((name, description, minutes, price, category), i)| Treatment {
            id: i,
            index: i,
            name: name.to_string(),
            description: description.to_string(),
            duration_minutes: *minutes,
            price: *price,
            category_id: Some(*category),
            is_active: true,
        })
        .collect()
}

fn demo_locations() -> Vec<Location> {
    let rows = [
        ("Seminyak", "Jl. Kayu Aya 18, Seminyak", "+62 361 730 100"),
        ("Ubud", "Jl. Raya Ubud 42, Ubud", "+62 361 975 200"),
        ("Canggu", "Jl. Batu Bolong 7, Canggu", "+62 361 844 300"),
    ];
    rows.iter()
        .zip(1u32..)
        .map(|((name, address, phone), i)| Location {
            id: i,
            index: i,
            name: name.to_string(),
            address: address.to_string(),
            phone: Some(phone.to_string()),
            opening_hours: Some("10:00 - 22:00".to_string()),
        })
        .collect()
}

fn demo_team_members() -> Vec<TeamMember> {
    let rows = [
        (1, "Ayu Lestari", "Senior Therapist"),
        (1, "Komang Sari", "Therapist"),
        (1, "Made Wirawan", "Spa Manager"),
        (2, "Wayan Putri", "Therapist"),
        (2, "Nyoman Dewi", "Facialist"),
        (3, "Ketut Arya", "Therapist"),
    ];
    let mut per_location = [0u32; 4];
    rows.iter()
        .zip(1u32..)
        .map(|((location_id, name, role), i)| {
            let slot = &mut per_location[*location_id as usize];
            *slot += 1;
            TeamMember {
                id: i,
                index: *slot,
                location_id: *location_id,
                name: name.to_string(),
                role: role.to_string(),
                bio: None,
                is_active: true,
            }
        })
        .collect()
}

fn demo_pricing_rows() -> Vec<PricingRow> {
    let rows = [
        (1, "60 minutes", 60, 45_000_00),
        (1, "90 minutes", 90, 62_000_00),
        (1, "120 minutes", 120, 80_000_00),
        (2, "90 minutes", 90, 62_000_00),
        (2, "120 minutes", 120, 78_000_00),
    ];
    let mut per_treatment = [0u32; 3];
    rows.iter()
        .zip(1u32..)
        .map(|((treatment_id, label, minutes, price), i)| {
            let slot = &mut per_treatment[*treatment_id as usize];
            *slot += 1;
            PricingRow {
                id: i,
                index: *slot,
                treatment_id: *treatment_id,
                label: label.to_string(),
                duration_minutes: *minutes,
                price: *price,
            }
        })
        .collect()
}

fn demo_faqs() -> Vec<Faq> {
    let rows = [
        ("Do I need to book in advance?", "Walk-ins are welcome, but booking guarantees your slot."),
        ("Can I cancel my booking?", "Free cancellation up to 4 hours before the appointment."),
        ("Do you offer hotel pick-up?", "Yes, within 5 km of each location."),
        ("Are gift cards available?", "Gift cards can be bought at reception or online."),
        ("What should I wear?", "Disposable underwear and a robe are provided."),
        ("Is there parking?", "Free scooter and car parking at every location."),
    ];
    rows.iter()
        .zip(1u32..)
        .map(|((question, answer), i)| Faq {
            id: i,
            index: i,
            question: question.to_string(),
            answer: answer.to_string(),
        })
        .collect()
}

fn demo_memberships() -> Vec<Membership> {
    let rows = [
        ("Silver", 150_000_00, 3, vec!["10% off treatments"]),
        ("Gold", 280_000_00, 6, vec!["15% off treatments", "Free cream bath monthly"]),
        ("Platinum", 500_000_00, 12, vec!["20% off treatments", "Priority booking", "Guest pass"]),
    ];
    rows.into_iter()
        .zip(1u32..)
        .map(|((name, price, months, benefits), i)| Membership {
            id: i,
            index: i,
            name: name.to_string(),
            price,
            duration_months: months,
            benefits: benefits.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

fn demo_spa_packages() -> Vec<SpaPackage> {
    let rows = [
        ("Bali Escape", "Massage, scrub and flower bath.", 95_000_00, vec![1, 4]),
        ("Total Renewal", "Full-day ritual with lunch.", 180_000_00, vec![2, 5, 6]),
    ];
    rows.into_iter()
        .zip(1u32..)
        .map(|((name, description, price, treatment_ids), i)| SpaPackage {
            id: i,
            index: i,
            name: name.to_string(),
            description: Some(description.to_string()),
            price,
            treatment_ids,
        })
        .collect()
}
