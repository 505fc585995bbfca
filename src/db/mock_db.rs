use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

use crate::db::event_repository::EventRepository;
use crate::db::place_repository::PlaceRepository;
use crate::db::user_repository::UserRepository;
use crate::db::visit_repository::VisitRepository;
use crate::models::event::{Booking, Event, NewEvent};
use crate::models::place::{NewPlace, Place};
use crate::models::user::{NewUser, User};
use crate::models::visit::{NewVisit, VisitedPlace};

/// In-memory stand-in for the Postgres repositories, used by handler and
/// middleware tests. State lives behind Mutexes so a single instance can be
/// shared through `Arc` the same way the real pool is.
#[allow(dead_code)]
#[derive(Default)]
pub struct MockDb {
    pub users: Mutex<Vec<User>>,
    pub events: Mutex<Vec<Event>>,
    pub places: Mutex<Vec<Place>>,
    pub visits: Mutex<Vec<VisitedPlace>>,
    pub bookings: Mutex<Vec<Booking>>,
    pub should_fail: bool,
}

impl MockDb {
    fn guard(&self) -> Result<(), sqlx::Error> {
        if self.should_fail {
            Err(sqlx::Error::Protocol("Mock DB failure".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserRepository for MockDb {
    async fn create_user(&self, new_user: &NewUser) -> Result<User, sqlx::Error> {
        self.guard()?;
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            profile_pick: new_user.profile_pick.clone(),
            role: new_user.role,
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        self.guard()?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        self.guard()?;
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        self.guard()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update_user(&self, id: Uuid, changes: &NewUser) -> Result<User, sqlx::Error> {
        self.guard()?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(sqlx::Error::RowNotFound)?;
        user.name = changes.name.clone();
        user.email = changes.email.clone();
        user.password_hash = changes.password_hash.clone();
        user.profile_pick = changes.profile_pick.clone();
        user.role = changes.role;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), sqlx::Error> {
        self.guard()?;
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }

    async fn insert_booking(&self, event_id: Uuid, user_id: Uuid) -> Result<Booking, sqlx::Error> {
        self.guard()?;
        let booking = Booking { event_id, user_id };
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(booking)
    }
}

#[async_trait]
impl EventRepository for MockDb {
    async fn create_event(&self, new_event: &NewEvent) -> Result<Event, sqlx::Error> {
        self.guard()?;
        let event = Event {
            id: Uuid::new_v4(),
            title: new_event.title.clone(),
            event_date: new_event.event_date,
            description: new_event.description.clone(),
            place_id: Some(new_event.place_id),
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn list_events(&self) -> Result<Vec<Event>, sqlx::Error> {
        self.guard()?;
        Ok(self.events.lock().unwrap().clone())
    }

    async fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
        self.guard()?;
        Ok(self.events.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn update_event(&self, id: Uuid, changes: &NewEvent) -> Result<Event, sqlx::Error> {
        self.guard()?;
        let mut events = self.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(sqlx::Error::RowNotFound)?;
        event.title = changes.title.clone();
        event.event_date = changes.event_date;
        event.description = changes.description.clone();
        event.place_id = Some(changes.place_id);
        Ok(event.clone())
    }

    async fn delete_event(&self, id: Uuid) -> Result<(), sqlx::Error> {
        self.guard()?;
        self.events.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }
}

#[async_trait]
impl PlaceRepository for MockDb {
    async fn create_place(&self, new_place: &NewPlace) -> Result<Place, sqlx::Error> {
        self.guard()?;
        let place = Place {
            id: Uuid::new_v4(),
            name: new_place.name.clone(),
            place_type: new_place.place_type,
            address: new_place.address.clone(),
        };
        self.places.lock().unwrap().push(place.clone());
        Ok(place)
    }

    async fn list_places(&self) -> Result<Vec<Place>, sqlx::Error> {
        self.guard()?;
        Ok(self.places.lock().unwrap().clone())
    }

    async fn find_place_by_id(&self, id: Uuid) -> Result<Option<Place>, sqlx::Error> {
        self.guard()?;
        Ok(self.places.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn update_place(&self, id: Uuid, changes: &NewPlace) -> Result<Place, sqlx::Error> {
        self.guard()?;
        let mut places = self.places.lock().unwrap();
        let place = places
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(sqlx::Error::RowNotFound)?;
        place.name = changes.name.clone();
        place.place_type = changes.place_type;
        place.address = changes.address.clone();
        Ok(place.clone())
    }

    async fn delete_place(&self, id: Uuid) -> Result<(), sqlx::Error> {
        self.guard()?;
        self.places.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl VisitRepository for MockDb {
    async fn create_visit(&self, new_visit: &NewVisit) -> Result<VisitedPlace, sqlx::Error> {
        self.guard()?;
        let visit = VisitedPlace {
            user_id: new_visit.user_id,
            place_id: new_visit.place_id,
            visit_date: new_visit
                .visit_date
                .unwrap_or_else(|| Utc::now().naive_utc()),
        };
        self.visits.lock().unwrap().push(visit.clone());
        Ok(visit)
    }

    async fn list_visits(&self) -> Result<Vec<VisitedPlace>, sqlx::Error> {
        self.guard()?;
        Ok(self.visits.lock().unwrap().clone())
    }

    async fn list_visits_by_user(&self, user_id: Uuid) -> Result<Vec<VisitedPlace>, sqlx::Error> {
        self.guard()?;
        Ok(self
            .visits
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_visits_by_place(&self, place_id: Uuid) -> Result<Vec<VisitedPlace>, sqlx::Error> {
        self.guard()?;
        Ok(self
            .visits
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.place_id == place_id)
            .cloned()
            .collect())
    }

    async fn find_visit(
        &self,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<Option<VisitedPlace>, sqlx::Error> {
        self.guard()?;
        Ok(self
            .visits
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.user_id == user_id && v.place_id == place_id)
            .cloned())
    }

    async fn update_visit_date(
        &self,
        user_id: Uuid,
        place_id: Uuid,
        visit_date: Option<NaiveDateTime>,
    ) -> Result<VisitedPlace, sqlx::Error> {
        self.guard()?;
        let mut visits = self.visits.lock().unwrap();
        let visit = visits
            .iter_mut()
            .find(|v| v.user_id == user_id && v.place_id == place_id)
            .ok_or(sqlx::Error::RowNotFound)?;
        if let Some(date) = visit_date {
            visit.visit_date = date;
        }
        Ok(visit.clone())
    }

    async fn delete_visit(&self, user_id: Uuid, place_id: Uuid) -> Result<(), sqlx::Error> {
        self.guard()?;
        self.visits
            .lock()
            .unwrap()
            .retain(|v| !(v.user_id == user_id && v.place_id == place_id));
        Ok(())
    }
}
