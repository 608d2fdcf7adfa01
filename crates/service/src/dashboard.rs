//! Artist and admin dashboards plus the booking trend report.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Month, NaiveDate, NaiveDateTime};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::{artist, booking, gallery, piercing, review, user};

use crate::access::Identity;
use crate::artists::{apply, ArtistInput};
use crate::errors::ServiceError;

const PREVIEW: u64 = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArtistMetrics {
    pub total_bookings: u64,
    pub total_earnings: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistDashboard {
    pub artist_details: artist::Model,
    pub upcoming_bookings: Vec<booking::Model>,
    pub recent_reviews: Vec<review::Model>,
    pub portfolio_preview: Vec<gallery::Model>,
    pub performance_metrics: ArtistMetrics,
}

/// Fields an artist may change from the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub specialties: Option<String>,
    pub bio: Option<String>,
    pub social_media: Option<serde_json::Value>,
    pub years_of_experience: Option<i32>,
}

impl From<ProfileUpdate> for ArtistInput {
    fn from(p: ProfileUpdate) -> Self {
        ArtistInput {
            name: p.name,
            specialties: p.specialties,
            bio: p.bio,
            social_media: p.social_media,
            years_of_experience: p.years_of_experience,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PersonalMetrics {
    pub total_bookings: u64,
    pub total_piercings: u64,
    pub total_earnings: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalData {
    pub artist_details: artist::Model,
    pub upcoming_bookings: Vec<booking::Model>,
    pub upcoming_piercings: Vec<piercing::Model>,
    pub recent_reviews: Vec<review::Model>,
    pub performance_metrics: PersonalMetrics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AppointmentRecord {
    Booking(booking::Model),
    Piercing(piercing::Model),
}

/// One row of the admin appointment list: the record plus its kind and artist.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentEntry {
    #[serde(flatten)]
    pub record: AppointmentRecord,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub artist_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlatformMetrics {
    pub total_bookings: u64,
    pub total_piercings: u64,
    pub total_appointments: u64,
    pub total_earnings: f64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub personal_data: Option<PersonalData>,
    pub users: Vec<user::Model>,
    pub appointments: Vec<AppointmentEntry>,
    pub platform_metrics: PlatformMetrics,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthCount {
    pub month: String,
    pub total_bookings: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingTrends {
    pub year: i32,
    pub monthly_trends: Vec<MonthCount>,
}

async fn owned_profile<C: ConnectionTrait>(db: &C, who: &Identity) -> Result<artist::Model, ServiceError> {
    artist::find_by_owner(db, who.user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Artist profile not found.".into()))
}

async fn sum_price<C, E>(db: &C, select: sea_orm::Select<E>, col: E::Column) -> Result<f64, ServiceError>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let total: Option<Option<f64>> = select
        .select_only()
        .column_as(Expr::col(col).sum(), "total")
        .into_tuple()
        .one(db)
        .await?;
    Ok(total.flatten().unwrap_or(0.0))
}

async fn upcoming_bookings<C: ConnectionTrait>(db: &C, artist_id: i32, now: NaiveDateTime) -> Result<Vec<booking::Model>, ServiceError> {
    Ok(booking::Entity::find()
        .filter(booking::Column::ArtistId.eq(artist_id))
        .filter(booking::Column::AppointmentDate.gt(now))
        .order_by_asc(booking::Column::AppointmentDate)
        .limit(PREVIEW)
        .all(db)
        .await?)
}

async fn recent_reviews<C: ConnectionTrait>(db: &C, artist_id: i32) -> Result<Vec<review::Model>, ServiceError> {
    Ok(review::Entity::find()
        .filter(review::Column::ArtistId.eq(artist_id))
        .order_by_desc(review::Column::CreatedAt)
        .order_by_desc(review::Column::Id)
        .limit(PREVIEW)
        .all(db)
        .await?)
}

#[instrument(skip(db), fields(user_id = who.user_id))]
pub async fn artist_dashboard(db: &DatabaseConnection, who: &Identity) -> Result<ArtistDashboard, ServiceError> {
    let profile = owned_profile(db, who).await?;
    let now = common::datetime::now();
    let bookings = booking::Entity::find().filter(booking::Column::ArtistId.eq(profile.id));

    let upcoming_bookings = upcoming_bookings(db, profile.id, now).await?;
    let recent_reviews = recent_reviews(db, profile.id).await?;
    let portfolio_preview = gallery::Entity::find()
        .filter(gallery::Column::ArtistId.eq(profile.id))
        .order_by_asc(gallery::Column::Id)
        .limit(PREVIEW)
        .all(db)
        .await?;
    let performance_metrics = ArtistMetrics {
        total_bookings: bookings.clone().count(db).await?,
        total_earnings: sum_price(db, bookings, booking::Column::Price).await?,
    };

    Ok(ArtistDashboard { artist_details: profile, upcoming_bookings, recent_reviews, portfolio_preview, performance_metrics })
}

#[instrument(skip(db, input), fields(user_id = who.user_id))]
pub async fn update_artist_profile(db: &DatabaseConnection, who: &Identity, input: ProfileUpdate) -> Result<artist::Model, ServiceError> {
    let profile = owned_profile(db, who).await?;
    let id = profile.id;
    let mut am: artist::ActiveModel = profile.into();
    apply(&mut am, input.into())?;
    am.updated_at = Set(common::datetime::now());
    let updated = am.update(db).await?;
    info!(artist_id = id, "artist_profile_updated");
    Ok(updated)
}

async fn personal_data(db: &DatabaseConnection, who: &Identity, now: NaiveDateTime) -> Result<Option<PersonalData>, ServiceError> {
    let Some(profile) = artist::find_by_owner(db, who.user_id).await? else {
        return Ok(None);
    };
    let bookings = booking::Entity::find().filter(booking::Column::ArtistId.eq(profile.id));
    let piercings = piercing::Entity::find().filter(piercing::Column::ArtistId.eq(profile.id));

    let upcoming_bookings = upcoming_bookings(db, profile.id, now).await?;
    let upcoming_piercings = piercings
        .clone()
        .filter(piercing::Column::AppointmentDate.gt(now))
        .order_by_asc(piercing::Column::AppointmentDate)
        .limit(PREVIEW)
        .all(db)
        .await?;
    let recent_reviews = recent_reviews(db, profile.id).await?;
    let performance_metrics = PersonalMetrics {
        total_bookings: bookings.clone().count(db).await?,
        total_piercings: piercings.clone().count(db).await?,
        total_earnings: sum_price(db, bookings, booking::Column::Price).await?
            + sum_price(db, piercings, piercing::Column::Price).await?,
    };

    Ok(Some(PersonalData { artist_details: profile, upcoming_bookings, upcoming_piercings, recent_reviews, performance_metrics }))
}

/// Mean star rating across all reviews, two decimals, 0 when there are none.
async fn platform_rating<C: ConnectionTrait>(db: &C) -> Result<f64, ServiceError> {
    let avg: Option<Option<f64>> = review::Entity::find()
        .select_only()
        .column_as(Expr::cust("CAST(AVG(star_rating) AS DOUBLE PRECISION)"), "avg")
        .into_tuple()
        .one(db)
        .await?;
    let avg = avg.flatten().unwrap_or(0.0);
    Ok((avg * 100.0).round() / 100.0)
}

#[instrument(skip(db), fields(user_id = who.user_id))]
pub async fn admin_dashboard(db: &DatabaseConnection, who: &Identity) -> Result<AdminDashboard, ServiceError> {
    let now = common::datetime::now();
    let personal_data = personal_data(db, who, now).await?;
    let users = crate::users::list_users(db).await?;

    let bookings = booking::Entity::find().order_by_asc(booking::Column::Id).all(db).await?;
    let piercings = piercing::Entity::find().order_by_asc(piercing::Column::Id).all(db).await?;
    let names: HashMap<i32, String> = artist::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();

    let total_earnings = bookings.iter().map(|b| b.price).sum::<f64>() + piercings.iter().map(|p| p.price).sum::<f64>();
    let platform_metrics = PlatformMetrics {
        total_bookings: bookings.len() as u64,
        total_piercings: piercings.len() as u64,
        total_appointments: (bookings.len() + piercings.len()) as u64,
        total_earnings,
        average_rating: platform_rating(db).await?,
    };

    let mut appointments = Vec::with_capacity(bookings.len() + piercings.len());
    appointments.extend(bookings.into_iter().map(|b| AppointmentEntry {
        artist_name: names.get(&b.artist_id).cloned(),
        kind: "booking",
        record: AppointmentRecord::Booking(b),
    }));
    appointments.extend(piercings.into_iter().map(|p| AppointmentEntry {
        artist_name: p.artist_id.and_then(|id| names.get(&id).cloned()),
        kind: "piercing",
        record: AppointmentRecord::Piercing(p),
    }));

    Ok(AdminDashboard { personal_data, users, appointments, platform_metrics })
}

/// Bookings in `now`'s calendar year grouped by appointment month, chronological.
pub async fn monthly_trends(db: &DatabaseConnection, now: NaiveDateTime) -> Result<BookingTrends, ServiceError> {
    let year = now.year();
    let start = NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    let (Some(start), Some(end)) = (start, end) else {
        return Err(ServiceError::Internal(format!("year {year} out of range")));
    };

    let dates: Vec<NaiveDateTime> = booking::Entity::find()
        .select_only()
        .column(booking::Column::AppointmentDate)
        .filter(booking::Column::AppointmentDate.gte(start))
        .filter(booking::Column::AppointmentDate.lt(end))
        .into_tuple()
        .all(db)
        .await?;

    let mut by_month: BTreeMap<u32, u64> = BTreeMap::new();
    for d in dates {
        *by_month.entry(d.month()).or_default() += 1;
    }
    let monthly_trends = by_month
        .into_iter()
        .filter_map(|(m, total_bookings)| {
            let month = Month::try_from(u8::try_from(m).ok()?).ok()?;
            Some(MonthCount { month: month.name().to_string(), total_bookings })
        })
        .collect();

    Ok(BookingTrends { year, monthly_trends })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self as fx, get_db};
    use chrono::Duration;
    use models::user::Role;

    fn identity(u: &user::Model) -> Identity {
        Identity { user_id: u.id, username: u.username.clone(), role: u.role }
    }

    #[tokio::test]
    async fn artist_dashboard_collects_previews_and_metrics() -> anyhow::Result<()> {
        let db = get_db().await?;
        let amy = fx::user(&db, "amy", Role::Artist).await?;
        let a = fx::artist(&db, amy.id, "Amy Ink").await?;
        let now = common::datetime::now();
        for i in 0..6 {
            fx::booking_at(&db, a.id, &format!("c{i}"), 100.0, now + Duration::days(i + 1)).await?;
        }
        fx::booking_at(&db, a.id, "past", 50.0, now - Duration::days(30)).await?;
        fx::raw_review(&db, a.id, 5).await?;

        let d = artist_dashboard(&db, &identity(&amy)).await?;
        assert_eq!(d.artist_details.id, a.id);
        assert_eq!(d.upcoming_bookings.len(), 5);
        assert_eq!(d.upcoming_bookings[0].name, "c0");
        assert!(d.upcoming_bookings.windows(2).all(|w| w[0].appointment_date <= w[1].appointment_date));
        assert_eq!(d.recent_reviews.len(), 1);
        assert_eq!(d.performance_metrics, ArtistMetrics { total_bookings: 7, total_earnings: 650.0 });
        Ok(())
    }

    #[tokio::test]
    async fn artist_without_profile_gets_404() -> anyhow::Result<()> {
        let db = get_db().await?;
        let bob = fx::user(&db, "bob", Role::Artist).await?;
        let res = artist_dashboard(&db, &identity(&bob)).await;
        assert!(matches!(res, Err(ServiceError::NotFound(m)) if m == "Artist profile not found."));
        Ok(())
    }

    #[tokio::test]
    async fn profile_update_touches_only_dashboard_fields() -> anyhow::Result<()> {
        let db = get_db().await?;
        let amy = fx::user(&db, "amy", Role::Artist).await?;
        let a = fx::artist(&db, amy.id, "Amy Ink").await?;
        let input = ProfileUpdate { bio: Some("Fine line specialist".into()), years_of_experience: Some(9), ..Default::default() };
        let updated = update_artist_profile(&db, &identity(&amy), input).await?;
        assert_eq!(updated.bio.as_deref(), Some("Fine line specialist"));
        assert_eq!(updated.years_of_experience, Some(9));
        assert_eq!(updated.styles, a.styles);
        Ok(())
    }

    #[tokio::test]
    async fn admin_dashboard_aggregates_platform() -> anyhow::Result<()> {
        let db = get_db().await?;
        let root = fx::user(&db, "root", Role::Admin).await?;
        let amy = fx::user(&db, "amy", Role::Artist).await?;
        let a = fx::artist(&db, amy.id, "Amy Ink").await?;
        fx::booking(&db, a.id, "Kim", 200.0).await?;
        fx::piercing(&db, Some(a.id), "Lee", 40.0).await?;
        fx::piercing(&db, None, "Max", 35.0).await?;
        for stars in [5, 4, 4] {
            fx::raw_review(&db, a.id, stars).await?;
        }

        let d = admin_dashboard(&db, &identity(&root)).await?;
        assert!(d.personal_data.is_none());
        assert_eq!(d.users.len(), 2);
        assert_eq!(
            d.platform_metrics,
            PlatformMetrics { total_bookings: 1, total_piercings: 2, total_appointments: 3, total_earnings: 275.0, average_rating: 4.33 }
        );
        assert_eq!(d.appointments.len(), 3);
        let kinds: Vec<_> = d.appointments.iter().map(|e| (e.kind, e.artist_name.as_deref())).collect();
        assert_eq!(kinds, vec![("booking", Some("Amy Ink")), ("piercing", Some("Amy Ink")), ("piercing", None)]);

        let json = serde_json::to_value(&d.appointments[0])?;
        assert_eq!(json["type"], "booking");
        assert_eq!(json["name"], "Kim");
        Ok(())
    }

    #[tokio::test]
    async fn admin_with_profile_gets_personal_data() -> anyhow::Result<()> {
        let db = get_db().await?;
        let root = fx::user(&db, "root", Role::Admin).await?;
        let a = fx::artist(&db, root.id, "Root Studio").await?;
        fx::booking(&db, a.id, "Kim", 100.0).await?;
        fx::piercing(&db, Some(a.id), "Lee", 30.0).await?;

        let d = admin_dashboard(&db, &identity(&root)).await?;
        let personal = d.personal_data.ok_or_else(|| anyhow::anyhow!("missing personal data"))?;
        assert_eq!(personal.upcoming_piercings.len(), 1);
        assert_eq!(personal.performance_metrics, PersonalMetrics { total_bookings: 1, total_piercings: 1, total_earnings: 130.0 });
        assert_eq!(d.platform_metrics.average_rating, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn trends_group_current_year_by_month() -> anyhow::Result<()> {
        let db = get_db().await?;
        let amy = fx::user(&db, "amy", Role::Artist).await?;
        let a = fx::artist(&db, amy.id, "Amy Ink").await?;
        let at = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(12, 0, 0)).ok_or_else(|| anyhow::anyhow!("bad date"));
        fx::booking_at(&db, a.id, "a", 10.0, at(2030, 3, 2)?).await?;
        fx::booking_at(&db, a.id, "b", 10.0, at(2030, 1, 15)?).await?;
        fx::booking_at(&db, a.id, "c", 10.0, at(2030, 3, 20)?).await?;
        fx::booking_at(&db, a.id, "d", 10.0, at(2029, 12, 31)?).await?;

        let trends = monthly_trends(&db, at(2030, 6, 1)?).await?;
        assert_eq!(trends.year, 2030);
        assert_eq!(
            trends.monthly_trends,
            vec![
                MonthCount { month: "January".into(), total_bookings: 1 },
                MonthCount { month: "March".into(), total_bookings: 2 },
            ]
        );
        Ok(())
    }
}
