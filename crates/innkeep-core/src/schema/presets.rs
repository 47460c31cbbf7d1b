//! Schemas for the dashboard's entities.

use super::{FieldDef, Schema, STATUS_FIELD};

/// Booking status values.
pub const BOOKING_STATUSES: [&str; 3] = ["Confirmed", "Pending", "Cancelled"];

/// Room approval status values.
pub const ROOM_STATUSES: [&str; 3] = ["Approved", "Pending", "Rejected"];

impl Schema {
    /// Guest bookings.
    pub fn booking() -> Schema {
        Schema {
            entity: "booking".to_string(),
            fields: vec![
                FieldDef::text("name").required().searchable().sortable(),
                FieldDef::text("room").required().searchable().sortable(),
                FieldDef::date("date").required().sortable(),
                FieldDef::status(STATUS_FIELD, BOOKING_STATUSES)
                    .required()
                    .sortable()
                    .with_default("Pending"),
                FieldDef::number("price").positive().sortable(),
            ],
        }
    }

    /// Rooms awaiting or holding approval.
    pub fn room() -> Schema {
        Schema {
            entity: "room".to_string(),
            fields: vec![
                FieldDef::text("name").required().searchable().sortable(),
                FieldDef::integer("capacity").required().positive().sortable(),
                FieldDef::text("category").required().searchable().sortable(),
                FieldDef::number("price").required().positive().sortable(),
                FieldDef::status(STATUS_FIELD, ROOM_STATUSES)
                    .required()
                    .sortable()
                    .with_default("Pending"),
            ],
        }
    }

    /// Registered users.
    pub fn user() -> Schema {
        Schema {
            entity: "user".to_string(),
            fields: vec![
                FieldDef::text("name").required().searchable().sortable(),
                FieldDef::text("email").required().searchable().sortable(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_pass_builder_checks() {
        for schema in [Schema::booking(), Schema::room(), Schema::user()] {
            let mut builder = Schema::builder(schema.entity());
            for def in schema.fields() {
                builder = builder.field(def.clone());
            }
            assert_eq!(builder.build().unwrap(), schema);
        }
    }

    #[test]
    fn users_have_no_status() {
        assert!(Schema::user().status_field().is_none());
        assert_eq!(
            Schema::room().status_values().unwrap(),
            &ROOM_STATUSES.map(String::from)
        );
    }
}
