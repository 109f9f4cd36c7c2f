//! Writes a synthetic `hei_data.csv` / `entry_data.csv` pair in the HESA
//! estates layout, so the dashboard runs without the real download.
//!
//! Usage: `generate_sample [OUTPUT_DIR]` (defaults to `data`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const YEARS: [&str; 4] = ["2018/19", "2019/20", "2020/21", "2021/22"];

/// (name, region, lat, lon); a `None` position is an institution the
/// geocoder could not place.
const INSTITUTIONS: &[(&str, &str, Option<(f64, f64)>)] = &[
    ("Anglia Ruskin University", "East of England", Some((52.2030, 0.1340))),
    ("University of East Anglia", "East of England", Some((52.6219, 1.2392))),
    ("University of Bath", "South West", Some((51.3782, -2.3264))),
    ("University of Exeter", "South West", Some((50.7371, -3.5351))),
    ("University of Bristol", "South West", Some((51.4584, -2.6030))),
    ("University College London", "London", Some((51.5246, -0.1340))),
    ("King's College London", "London", Some((51.5115, -0.1160))),
    ("Imperial College of Science, Technology and Medicine", "London", Some((51.4988, -0.1749))),
    ("Guildhall School of Music & Drama", "London", Some((51.5200, -0.0920))),
    ("Newcastle University", "North East", Some((54.9790, -1.6147))),
    ("University of Durham", "North East", Some((54.7650, -1.5782))),
    ("The University of Manchester", "North West", Some((53.4668, -2.2339))),
    ("Royal Northern College of Music", "North West", None),
    ("University of Leeds", "Yorkshire and The Humber", Some((53.8067, -1.5550))),
    ("The University of Sheffield", "Yorkshire and The Humber", Some((53.3811, -1.4882))),
    ("University of Nottingham", "East Midlands", Some((52.9387, -1.1955))),
    ("University of Birmingham", "West Midlands", Some((52.4508, -1.9305))),
    ("University of Oxford", "South East", Some((51.7548, -1.2544))),
    ("University of Kent", "South East", Some((51.2980, 1.0700))),
];

enum Metric {
    /// Numeric series around a base value, scaled by institution size.
    Amount(f64),
    /// Yes/No answer.
    Flag,
}

/// (class, category marker, categories)
const CATALOGUE: &[(&str, &str, &[(&str, Metric)])] = &[
    ("Building and spaces", "Floor area", &[
        ("Gross internal area (m2)", Metric::Amount(400_000.0)),
        ("Non-residential floor area (m2)", Metric::Amount(300_000.0)),
    ]),
    ("Building and spaces", "Environmental management", &[
        ("Environmental management system external verification", Metric::Flag),
    ]),
    ("Energy", "Energy consumption", &[
        ("Total energy consumption (kWh)", Metric::Amount(90_000_000.0)),
        ("Renewable energy (kWh)", Metric::Amount(6_000_000.0)),
    ]),
    ("Energy", "Energy sources", &[
        ("Grid electricity (kWh)", Metric::Amount(40_000_000.0)),
        ("Natural gas (kWh)", Metric::Amount(35_000_000.0)),
    ]),
    ("Emissions and waste", "Scope 1 and 2", &[
        ("Total scope 1 and 2 carbon emissions (Kg CO2e)", Metric::Amount(20_000_000.0)),
    ]),
    ("Emissions and waste", "Waste", &[
        ("Total waste (tonnes)", Metric::Amount(3_000.0)),
        ("Recycled waste (tonnes)", Metric::Amount(1_500.0)),
    ]),
    ("Transport and environment", "Travel", &[
        ("Staff commuting by car (%)", Metric::Amount(30.0)),
        ("Student commuting by car (%)", Metric::Amount(12.0)),
    ]),
    ("Finances and people", "Finances", &[
        ("Total income (£)", Metric::Amount(400_000_000.0)),
    ]),
    ("Finances and people", "People", &[
        ("Total staff (FTE)", Metric::Amount(4_000.0)),
        ("Total students (FTE)", Metric::Amount(20_000.0)),
    ]),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

fn write_institutions(path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(["UKPRN", "HE Provider", "Region of HE provider", "lat", "lon"])?;
    for (i, &(name, region, position)) in INSTITUTIONS.iter().enumerate() {
        let ukprn = (10_007_700 + i * 7).to_string();
        let (lat, lon) = position
            .map(|(lat, lon)| (lat.to_string(), lon.to_string()))
            .unwrap_or_default();
        wtr.write_record([ukprn.as_str(), name, region, lat.as_str(), lon.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_entries(path: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(["Academic Year", "HE Provider", "Class", "Category marker", "Category", "Value"])?;

    let mut rows = 0;
    for &(name, _, _) in INSTITUTIONS {
        let size = rng.range(0.3, 2.5);
        // Yearly drift shared by every metric of this institution.
        let drift = rng.range(-0.06, 0.03);
        for &(class, marker, categories) in CATALOGUE {
            for (category, metric) in categories {
                for (y, &year) in YEARS.iter().enumerate() {
                    // Roughly one value in twelve is unreported.
                    if rng.chance(1.0 / 12.0) {
                        continue;
                    }
                    let value = match *metric {
                        Metric::Flag => (if rng.chance(0.7) { "Yes" } else { "No" }).to_string(),
                        Metric::Amount(base) if base <= 100.0 => {
                            format!("{:.1}", (base * rng.range(0.6, 1.4)).min(100.0))
                        }
                        Metric::Amount(base) => {
                            let trend = 1.0 + drift * y as f64;
                            format!("{:.0}", base * size * trend * rng.range(0.95, 1.05))
                        }
                    };
                    wtr.write_record([year, name, class, marker, *category, value.as_str()])?;
                    rows += 1;
                }
            }
        }
    }
    wtr.flush()?;
    Ok(rows)
}

fn main() -> Result<()> {
    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "data".to_string()));
    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    let institutions_path = out_dir.join("hei_data.csv");
    write_institutions(&institutions_path)?;

    let entries_path = out_dir.join("entry_data.csv");
    let rows = write_entries(&entries_path, &mut rng)?;

    println!(
        "Wrote {} institutions to {} and {rows} metric rows to {}",
        INSTITUTIONS.len(),
        institutions_path.display(),
        entries_path.display()
    );
    Ok(())
}
