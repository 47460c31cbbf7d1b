//! Sample data bundled into the binary.

use innkeep_core::StaticLoader;

use crate::commands::Entity;

const BOOKINGS: &str = include_str!("../fixtures/bookings.json");
const ROOMS: &str = include_str!("../fixtures/rooms.json");
const USERS: &str = include_str!("../fixtures/users.json");

pub fn source(entity: Entity) -> &'static str {
    match entity {
        Entity::Bookings => BOOKINGS,
        Entity::Rooms => ROOMS,
        Entity::Users => USERS,
    }
}

pub fn loader(entity: Entity) -> StaticLoader {
    StaticLoader::new(source(entity))
}
