//! `ff vehicles`

use std::path::PathBuf;

use anyhow::Result;

use ff_core::vehicles::{ProfileLoader, VehicleKind, VehicleProfile};

pub fn execute(profiles: Option<PathBuf>) -> Result<()> {
    let list: Vec<VehicleProfile> = match profiles {
        Some(dir) => {
            let loader = ProfileLoader::new(&dir);
            let mut list = Vec::new();
            for id in loader.list()? {
                list.push(loader.load(&id)?);
            }
            list
        }
        None => VehicleKind::ALL.iter().map(|kind| kind.profile()).collect(),
    };

    println!(
        "{:<12} {:<14} {:>12} {:>6} {:>12}",
        "ID", "NAME", "MASS (kg)", "CD", "AREA (m²)"
    );
    for profile in &list {
        println!(
            "{:<12} {:<14} {:>12.6} {:>6.2} {:>12.8}",
            profile.kind.id(),
            profile.display_name,
            profile.aero.mass_kg,
            profile.aero.drag_coefficient,
            profile.aero.reference_area_m2
        );
    }
    Ok(())
}
