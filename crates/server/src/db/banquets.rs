//! Banquet booking repository.

use sqlx::PgPool;

use hotel_desk_core::BookingId;

use super::{RepositoryError, require_affected};
use crate::models::banquet::{Booking, BookingChanges, NewBooking};

const COLUMNS: &str = r"
    id, customer_name, phone_number, alternate_phone, address, event_type, event_date,
    start_time, end_time, expected_guests, amenities_required, food_type, menu_package,
    price_per_plate, number_of_plates, special_instructions, payment_details,
    advance_payment, payment_mode, booking_status, created_at
";

/// Repository for banquet booking database operations.
pub struct BookingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRepository<'a> {
    /// Create a new booking repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Booking>, RepositoryError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {COLUMNS} FROM hotel.banquet_booking ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(bookings)
    }

    /// Insert a booking.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, booking: &NewBooking) -> Result<Booking, RepositoryError> {
        let created = sqlx::query_as::<_, Booking>(&format!(
            r"
            INSERT INTO hotel.banquet_booking (
                customer_name, phone_number, event_type, event_date, start_time, end_time,
                expected_guests, menu_package, alternate_phone, address, amenities_required,
                food_type, price_per_plate, number_of_plates, special_instructions,
                payment_details, advance_payment, payment_mode, booking_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING {COLUMNS}
            "
        ))
        .bind(&booking.customer_name)
        .bind(&booking.phone_number)
        .bind(&booking.event_type)
        .bind(booking.event_date)
        .bind(&booking.start_time)
        .bind(&booking.end_time)
        .bind(booking.expected_guests)
        .bind(&booking.menu_package)
        .bind(booking.alternate_phone.as_deref())
        .bind(booking.address.as_deref())
        .bind(&booking.amenities_required)
        .bind(booking.food_type.as_deref())
        .bind(booking.price_per_plate)
        .bind(booking.number_of_plates)
        .bind(booking.special_instructions.as_deref())
        .bind(booking.payment_details.as_deref())
        .bind(booking.advance_payment)
        .bind(booking.payment_mode)
        .bind(booking.booking_status)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no booking has this id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: BookingId,
        changes: &BookingChanges,
    ) -> Result<Booking, RepositoryError> {
        let updated = sqlx::query_as::<_, Booking>(&format!(
            r"
            UPDATE hotel.banquet_booking
            SET customer_name = COALESCE($2, customer_name),
                phone_number = COALESCE($3, phone_number),
                alternate_phone = CASE WHEN $4 THEN $5 ELSE alternate_phone END,
                address = CASE WHEN $6 THEN $7 ELSE address END,
                event_type = COALESCE($8, event_type),
                event_date = COALESCE($9, event_date),
                start_time = COALESCE($10, start_time),
                end_time = COALESCE($11, end_time),
                expected_guests = COALESCE($12, expected_guests),
                amenities_required = CASE WHEN $13 THEN COALESCE($14, '{{}}') ELSE amenities_required END,
                food_type = CASE WHEN $15 THEN $16 ELSE food_type END,
                menu_package = COALESCE($17, menu_package),
                price_per_plate = CASE WHEN $18 THEN $19 ELSE price_per_plate END,
                number_of_plates = CASE WHEN $20 THEN $21 ELSE number_of_plates END,
                special_instructions = CASE WHEN $22 THEN $23 ELSE special_instructions END,
                payment_details = CASE WHEN $24 THEN $25 ELSE payment_details END,
                advance_payment = CASE WHEN $26 THEN $27 ELSE advance_payment END,
                payment_mode = CASE WHEN $28 THEN $29 ELSE payment_mode END,
                booking_status = COALESCE($30, booking_status)
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(changes.customer_name.as_deref())
        .bind(changes.phone_number.as_deref())
        .bind(changes.alternate_phone.is_write())
        .bind(changes.alternate_phone.as_deref())
        .bind(changes.address.is_write())
        .bind(changes.address.as_deref())
        .bind(changes.event_type.as_deref())
        .bind(changes.event_date)
        .bind(changes.start_time.as_deref())
        .bind(changes.end_time.as_deref())
        .bind(changes.expected_guests)
        .bind(changes.amenities_required.is_write())
        .bind(changes.amenities_required.value().cloned())
        .bind(changes.food_type.is_write())
        .bind(changes.food_type.as_deref())
        .bind(changes.menu_package.as_deref())
        .bind(changes.price_per_plate.is_write())
        .bind(changes.price_per_plate.value().copied())
        .bind(changes.number_of_plates.is_write())
        .bind(changes.number_of_plates.value().copied())
        .bind(changes.special_instructions.is_write())
        .bind(changes.special_instructions.as_deref())
        .bind(changes.payment_details.is_write())
        .bind(changes.payment_details.as_deref())
        .bind(changes.advance_payment.is_write())
        .bind(changes.advance_payment.value().copied())
        .bind(changes.payment_mode.is_write())
        .bind(changes.payment_mode.value().copied())
        .bind(changes.booking_status)
        .fetch_optional(self.pool)
        .await?;

        updated.ok_or(RepositoryError::NotFound)
    }

    /// Delete a booking.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no booking has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: BookingId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM hotel.banquet_booking WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}
