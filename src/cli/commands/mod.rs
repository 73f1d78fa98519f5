pub mod category;
pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        transaction::definitions(),
        category::definitions(),
        report::definitions(),
        system::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}
