use epidemic_model::{DiseaseModel, Model};

/// Headless frame loop: stands in for the interactive front end by stepping
/// the disease model once per "frame" and logging the outbreak curve.
fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut model = DiseaseModel::seeded(200.0, 200.0, 42);
    model.create_population();
    model.set_should_quarantine(true);
    model.set_have_central_location(true);
    model.set_social_distance_percent(40);
    model.set_exposure_time(15);
    model.set_infection_radius(15.0);

    for frame in 0..10_000u32 {
        let counts = model.step();
        if frame % 250 == 0 {
            log::info!(
                "frame {frame}: {} susceptible, {} infectious, {} removed",
                counts.susceptible,
                counts.infectious,
                counts.removed
            );
        }
        if counts.infectious == 0 {
            log::info!(
                "outbreak over after {frame} frames: {} never infected, {} removed",
                counts.susceptible,
                counts.removed
            );
            break;
        }
    }
}
