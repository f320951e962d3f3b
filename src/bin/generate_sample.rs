use std::path::Path;

use anyhow::{Context, Result};
use delivery_directory::data::normalize::infer_region;

/// Column layout shared by both directory exports; the DSP file names its
/// first column `DSP Name` instead of `Name`.
const TAIL_HEADERS: [&str; 9] = [
    "Street Address",
    "City",
    "State/Province",
    "Zip/Postal Code",
    "Country",
    "Region",
    "Owner",
    "LinkedIn",
    "Email",
];

const DSP_ROWS: usize = 180;
const FEDEX_ROWS: usize = 120;

/// Seeded splitmix64; enough to vary the sample rows reproducibly.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

struct Place {
    city: &'static str,
    state: &'static str,
    country: &'static str,
}

const PLACES: &[Place] = &[
    Place {
        city: "Austin",
        state: "TX",
        country: "USA",
    },
    Place {
        city: "Memphis",
        state: "TN",
        country: "United States",
    },
    Place {
        city: "Reno",
        state: "NV",
        country: "USA",
    },
    Place {
        city: "Toronto",
        state: "ON",
        country: "Canada",
    },
    Place {
        city: "Leeds",
        state: "West Yorkshire",
        country: "United Kingdom",
    },
    Place {
        city: "Hamburg",
        state: "HH",
        country: "Germany",
    },
    Place {
        city: "Lyon",
        state: "ARA",
        country: "France",
    },
    Place {
        city: "Monterrey",
        state: "NL",
        country: "Mexico",
    },
];

const NAME_STEMS: &[&str] = &[
    "Swift", "Blue Ridge", "Summit", "Prairie", "Harbor", "Red Oak", "Northstar", "Keystone",
];
const NAME_SUFFIXES: &[&str] = &["Logistics", "Delivery", "Express", "Couriers", "Freight"];
const OWNERS: &[&str] = &["Jordan Lee", "Sam Patel", "Alex Kim", "Riley Chen", "Casey Ortiz"];
const STREETS: &[&str] = &["Main St", "Commerce Blvd", "Industrial Pkwy", "Depot Rd"];

fn partner_row(rng: &mut SampleRng, idx: usize, suffix: &str) -> Vec<String> {
    let place = &PLACES[rng.below(PLACES.len() as u64) as usize];
    let name = format!("{} {} {idx}", rng.pick(NAME_STEMS), suffix);
    let owner = rng.pick(OWNERS);
    let linkedin = if rng.below(3) == 0 {
        String::new()
    } else {
        format!("https://www.linkedin.com/company/partner-{idx}")
    };
    let slug = name.to_lowercase().replace(' ', "-");

    vec![
        name,
        format!("{} {}", 100 + rng.below(9000), rng.pick(STREETS)),
        place.city.to_string(),
        place.state.to_string(),
        format!("{:05}", rng.below(100_000)),
        place.country.to_string(),
        infer_region(place.country).to_string(),
        owner.to_string(),
        linkedin,
        format!("ops@{slug}.example"),
    ]
}

fn write_directory(path: &Path, name_header: &str, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let header: Vec<&str> = std::iter::once(name_header).chain(TAIL_HEADERS).collect();
    writer.write_record(&header).context("writing header")?;
    for (i, row) in rows.iter().enumerate() {
        writer
            .write_record(row)
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SampleRng(42);

    let dsp: Vec<Vec<String>> = (0..DSP_ROWS)
        .map(|i| {
            let suffix = rng.pick(NAME_SUFFIXES);
            partner_row(&mut rng, i, suffix)
        })
        .collect();
    let fedex: Vec<Vec<String>> = (0..FEDEX_ROWS)
        .map(|i| partner_row(&mut rng, i, "ISP"))
        .collect();

    write_directory(Path::new("dsp_directory.csv"), "DSP Name", &dsp)?;
    log::info!("Wrote {} DSP entries to dsp_directory.csv", dsp.len());

    write_directory(Path::new("fedex_directory.csv"), "Name", &fedex)?;
    log::info!("Wrote {} FedEx ISP entries to fedex_directory.csv", fedex.len());

    println!(
        "Wrote dsp_directory.csv ({} rows) and fedex_directory.csv ({} rows)",
        dsp.len(),
        fedex.len()
    );
    Ok(())
}
