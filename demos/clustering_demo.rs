use entroscan::dataset::make_blobs;
use entroscan::features::{feature_table, PacketFeatures};
use entroscan::metrics::silhouette_score;
use entroscan::plot::{save_scatter, PlotOptions};
use entroscan::{Algorithm, Labels, Metric, StandardScaler, DBSCAN, NOISE};
use ndarray::{array, concatenate, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== DBSCAN on synthetic packet features ===\n");

    // three blobs standing in for header size / payload entropy pairs
    let centers = array![[1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]];
    let (blobs, _) = make_blobs(&centers, 250, 0.4, 0)?;
    let outliers = array![[4.0, 4.0], [-4.0, 3.5], [0.0, -5.0]];
    let x = concatenate(Axis(0), &[blobs.view(), outliers.view()])?;

    println!("Dataset: {} samples, {} features", x.nrows(), x.ncols());

    let mut scaler = StandardScaler::new();
    let x_scaled = scaler.fit_transform(&x)?;

    let configs = [
        (0.1, 10, "Tight neighbourhoods"),
        (0.3, 10, "Medium density"),
        (0.5, 10, "Loose neighbourhoods"),
        (0.3, 25, "Higher min_samples"),
    ];

    for &(eps, min_samples, description) in &configs {
        let mut dbscan = DBSCAN::new(eps, min_samples).algorithm(Algorithm::KdTree);
        let labels = dbscan.fit_predict(&x_scaled)?;
        let score = silhouette_score(&x_scaled, &labels, Metric::Euclidean)
            .map(|s| format!("{:.3}", s))
            .unwrap_or_else(|_| "undefined".to_string());

        println!(
            "DBSCAN(eps={}, min_samples={}): {} - {} clusters, {} noise points, silhouette {}",
            eps,
            min_samples,
            description,
            dbscan.get_n_clusters().unwrap_or(0),
            dbscan.get_n_noise_points().unwrap_or(0),
            score
        );
    }

    let mut best = DBSCAN::new(0.3, 10);
    best.fit(&x_scaled)?;
    let assignment = best.assignment().ok_or("DBSCAN produced no assignment")?;

    println!("\nDBSCAN (eps=0.3, min_samples=10) results:");
    println!("  Number of core samples: {}", assignment.n_core());
    print_cluster_summary(assignment.labels());

    save_scatter("dbscan_demo.png", &x_scaled, assignment, &PlotOptions::default())?;
    println!("\nScatter plot written to dbscan_demo.png");

    packet_entropy_demo()?;

    Ok(())
}

/// Cluster random-looking payloads apart from plain-text ones by their
/// byte entropy.
fn packet_entropy_demo() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== DBSCAN on byte-entropy features ===\n");

    let mut rng = StdRng::seed_from_u64(3);
    let header = [0x45u8, 0x00, 0x05, 0xdc, 0x1c, 0x46, 0x40, 0x00];
    let text = b"GET /index.html HTTP/1.1\r\nHost: example.org\r\n\r\n";

    let mut packets = Vec::new();
    for i in 0..40 {
        let payload: Vec<u8> = if i % 2 == 0 {
            (0..1400).map(|_| rng.r#gen()).collect()
        } else {
            text.iter().copied().cycle().take(1400).collect()
        };
        let packet: Vec<u8> = header.iter().chain(&payload).copied().collect();
        packets.push(PacketFeatures::from_bytes(&header, &packet));
    }

    let table = feature_table(&packets)?;
    let x = StandardScaler::new().fit_transform(table.features())?;
    let mut dbscan = DBSCAN::new(0.5, 5);
    let labels = dbscan.fit_predict(&x)?;
    println!(
        "{} packets, {} clusters by entropy",
        table.n_samples(),
        dbscan.get_n_clusters().unwrap_or(0)
    );
    print_cluster_summary(&labels);
    Ok(())
}

fn print_cluster_summary(labels: &Labels) {
    let mut ids: Vec<i32> = labels.iter().copied().collect();
    ids.sort_unstable();
    ids.dedup();

    for id in ids {
        let count = labels.iter().filter(|&&l| l == id).count();
        if id == NOISE {
            println!("    Noise: {} points", count);
        } else {
            println!("    Cluster {}: {} points", id, count);
        }
    }
}
