//! Writes a realistic probe-card metrology CSV export for manual testing:
//! free-form preamble, the data table, a blank line, then trailing metadata.

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_report.csv".to_string());
    let n_probes = 120;
    let mut rng = SimpleRng::new(42);

    let file = std::fs::File::create(&output_path).expect("Failed to create output file");
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(file);

    // Instrument preamble: free-form, variable length.
    writer
        .write_record(["PRVX-1100 Probe Card Report"])
        .expect("write preamble");
    writer
        .write_record(["Operator", "J. Smith"])
        .expect("write preamble");
    writer
        .write_record(["Card", "PC-4415-B"])
        .expect("write preamble");
    writer
        .write_record(["Date", "2024-11-08 09:31:02"])
        .expect("write preamble");

    writer
        .write_record([
            "Probe ID",
            "Diameter (µm)",
            "Planarity (µm)",
            "Contact Resistance (Ohm)",
            "User Defined Label 4",
        ])
        .expect("write header");

    for id in 1..=n_probes {
        let diameter = rng.gauss(19.0, 2.2);
        let planarity = rng.gauss(0.0, 1.5);
        let resistance = rng.gauss(1.8, 0.2);
        // Sprinkle in the dirt real exports have.
        let diameter_cell = if id % 37 == 0 {
            "n/a".to_string()
        } else {
            format!("{diameter:.2}")
        };
        writer
            .write_record([
                id.to_string(),
                diameter_cell,
                format!("{planarity:.2}"),
                format!("{resistance:.3}"),
                format!("P{id:03}"),
            ])
            .expect("write data row");
    }

    // Blank separator row, then trailing metadata the analyzer must ignore.
    writer.write_record([""]).expect("write separator");
    writer
        .write_record(["Checksum", "0x5A2F"])
        .expect("write trailer");
    writer
        .write_record(["End of report"])
        .expect("write trailer");

    writer.flush().expect("flush output");
    println!("Wrote {n_probes} probes to {output_path}");
}
