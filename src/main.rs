use log::{debug, warn};

use maxsum_rust::ui::io::read_instance;

fn main() {
    env_logger::init();
    debug!("starting max-sum demo");

    let instance_dir = "demos/instances";
    let entries = match std::fs::read_dir(instance_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("could not read {}: {} (nothing to run)", instance_dir, e);
            return;
        }
    };

    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!("skipping unreadable directory entry: {}", e);
                continue;
            }
        };

        debug!("loading instance from {}", path.display());
        let mut controller = match read_instance(&path) {
            Ok(controller) => controller,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let iterations = controller.optimise().expect("optimise should not fail on a well-formed instance");
        let values = controller.get_values().expect("get_values should not fail once optimise has run");
        println!("{}: converged in {} iterations", path.display(), iterations);
        for (var, val) in values {
            println!("  var {} = {}", var, val);
        }
    }
}
