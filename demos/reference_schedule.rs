use acqsim::config::ReferenceTime;
use acqsim::product_type::ProductType;

fn main() {
    let reference: ReferenceTime = match "UTC=2020-01-01T00:00:00".parse() {
        Ok(reference) => reference,
        Err(e) => {
            eprintln!("Failed to parse reference time: {}", e);
            return;
        }
    };

    println!("{:#?}", reference);

    for product_type in ProductType::ALL {
        let granules = product_type.schedule().granules(reference.instant());

        println!("\n{} ({} granules):", product_type, granules.len());
        for granule in granules.iter().take(4) {
            println!(
                "  {:>2}: {} -> {} {}",
                granule.number, granule.start, granule.stop, granule.position
            );
        }
    }
}
