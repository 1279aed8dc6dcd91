//! Banquet hall booking models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hotel_desk_core::{BookingId, BookingStatus, PaymentMode};

use super::input::{self, Patch, ValidationError};

/// A banquet booking.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Booking {
    pub id: BookingId,
    pub customer_name: String,
    pub phone_number: String,
    pub alternate_phone: Option<String>,
    pub address: Option<String>,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub expected_guests: i32,
    pub amenities_required: Vec<String>,
    pub food_type: Option<String>,
    pub menu_package: String,
    pub price_per_plate: Option<Decimal>,
    pub number_of_plates: Option<i32>,
    pub special_instructions: Option<String>,
    pub payment_details: Option<String>,
    pub advance_payment: Option<Decimal>,
    pub payment_mode: Option<PaymentMode>,
    pub booking_status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub customer_name: String,
    pub phone_number: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub expected_guests: i32,
    pub menu_package: String,
    pub alternate_phone: Option<String>,
    pub address: Option<String>,
    pub amenities_required: Vec<String>,
    pub food_type: Option<String>,
    pub price_per_plate: Option<Decimal>,
    pub number_of_plates: Option<i32>,
    pub special_instructions: Option<String>,
    pub payment_details: Option<String>,
    pub advance_payment: Option<Decimal>,
    pub payment_mode: Option<PaymentMode>,
    pub booking_status: BookingStatus,
}

/// Partial update of a booking. Nullable columns are [`Patch`]es so a
/// caller can clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingChanges {
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
    pub alternate_phone: Patch<String>,
    pub address: Patch<String>,
    pub event_type: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub expected_guests: Option<i32>,
    pub amenities_required: Patch<Vec<String>>,
    pub food_type: Patch<String>,
    pub menu_package: Option<String>,
    pub price_per_plate: Patch<Decimal>,
    pub number_of_plates: Patch<i32>,
    pub special_instructions: Patch<String>,
    pub payment_details: Patch<String>,
    pub advance_payment: Patch<Decimal>,
    pub payment_mode: Patch<PaymentMode>,
    pub booking_status: Option<BookingStatus>,
}

/// Fields shared by the create and update bodies.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookingFields {
    #[serde(deserialize_with = "input::scalar")]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub event_type: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub event_date: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub start_time: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub end_time: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub expected_guests: Option<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub menu_package: Option<String>,
    #[serde(deserialize_with = "input::patch")]
    pub alternate_phone: Patch<String>,
    #[serde(deserialize_with = "input::patch")]
    pub address: Patch<String>,
    #[serde(deserialize_with = "input::patch_list")]
    pub amenities_required: Patch<Vec<String>>,
    #[serde(deserialize_with = "input::patch")]
    pub food_type: Patch<String>,
    #[serde(deserialize_with = "input::patch")]
    pub price_per_plate: Patch<String>,
    #[serde(deserialize_with = "input::patch")]
    pub number_of_plates: Patch<String>,
    #[serde(deserialize_with = "input::patch")]
    pub special_instructions: Patch<String>,
    #[serde(deserialize_with = "input::patch")]
    pub payment_details: Patch<String>,
    #[serde(deserialize_with = "input::patch")]
    pub advance_payment: Patch<String>,
    #[serde(deserialize_with = "input::patch")]
    pub payment_mode: Patch<String>,
    #[serde(deserialize_with = "input::scalar")]
    pub booking_status: Option<String>,
}

/// Body of `POST /api/banquet_management`.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct CreateBookingRequest(pub BookingFields);

impl CreateBookingRequest {
    /// Check required fields in order and convert.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid field.
    pub fn validate(self) -> Result<NewBooking, ValidationError> {
        let f = self.0;
        Ok(NewBooking {
            customer_name: input::required_text(f.customer_name, "customer_name")?,
            phone_number: input::required_text(f.phone_number, "phone_number")?,
            event_type: input::required_text(f.event_type, "event_type")?,
            event_date: input::required_date(f.event_date, "event_date")?,
            start_time: input::required_text(f.start_time, "start_time")?,
            end_time: input::required_text(f.end_time, "end_time")?,
            expected_guests: input::required_number(f.expected_guests, "expected_guests")?,
            menu_package: input::required_text(f.menu_package, "menu_package")?,
            alternate_phone: f.alternate_phone.into_option(),
            address: f.address.into_option(),
            amenities_required: f.amenities_required.into_option().unwrap_or_default(),
            food_type: f.food_type.into_option(),
            price_per_plate: input::optional_amount(
                f.price_per_plate.into_option(),
                "price_per_plate",
            )?,
            number_of_plates: input::optional_number(
                f.number_of_plates.into_option(),
                "number_of_plates",
            )?,
            special_instructions: f.special_instructions.into_option(),
            payment_details: f.payment_details.into_option(),
            advance_payment: input::optional_amount(
                f.advance_payment.into_option(),
                "advance_payment",
            )?,
            payment_mode: input::optional_enum(f.payment_mode.into_option(), "payment_mode")?,
            booking_status: input::optional_enum(f.booking_status, "booking_status")?
                .unwrap_or_default(),
        })
    }
}

/// Body of `PUT /api/banquet_management`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookingRequest {
    #[serde(default, deserialize_with = "input::scalar")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: BookingFields,
}

impl UpdateBookingRequest {
    /// Resolve the target id and the changed columns.
    ///
    /// # Errors
    ///
    /// Returns `MissingKey` without an id and `NoFieldsToUpdate` when nothing
    /// would change.
    pub fn validate(self) -> Result<(BookingId, BookingChanges), ValidationError> {
        let id = BookingId::new(input::record_id(self.id, "id")?);
        let f = self.fields;
        let changes = BookingChanges {
            customer_name: f.customer_name,
            phone_number: f.phone_number,
            alternate_phone: f.alternate_phone,
            address: f.address,
            event_type: f.event_type,
            event_date: input::optional_date(f.event_date, "event_date")?,
            start_time: f.start_time,
            end_time: f.end_time,
            expected_guests: input::nonzero_number(f.expected_guests, "expected_guests")?,
            amenities_required: f.amenities_required,
            food_type: f.food_type,
            menu_package: f.menu_package,
            price_per_plate: input::patch_amount(f.price_per_plate, "price_per_plate")?,
            number_of_plates: input::patch_number(f.number_of_plates, "number_of_plates")?,
            special_instructions: f.special_instructions,
            payment_details: f.payment_details,
            advance_payment: input::patch_amount(f.advance_payment, "advance_payment")?,
            payment_mode: input::patch_enum(f.payment_mode, "payment_mode")?,
            booking_status: input::optional_enum(f.booking_status, "booking_status")?,
        };
        if changes == BookingChanges::default() {
            return Err(ValidationError::NoFieldsToUpdate);
        }
        Ok((id, changes))
    }
}
