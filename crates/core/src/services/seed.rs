//! First-run store seeding.

use pollbox_common::AppResult;
use pollbox_db::entities::User;
use pollbox_db::repositories::{PollRepository, ResponseRepository, UserRepository};
use tracing::info;

/// Roll numbers are drawn from this contiguous range.
const FIRST_ROLL: u32 = 1;
const LAST_ROLL: u32 = 61;

/// Reserved for an admission that was discontinued; never seeded.
const DISCONTINUED_ROLL: u32 = 13;

const ADMIN_ROLL_NUMBER: &str = "tutor";
const ADMIN_NAME: &str = "Tutor";
const ADMIN_EMAIL: &str = "tutor@college.edu";
const ADMIN_PASSWORD: &str = "admin123";

/// Placeholder display names, assigned to the roster in pool order
/// without replacement. Students replace theirs at first login.
const NAME_POOL: [&str; 64] = [
    "Aarav Sharma",
    "Aditi Krishnan",
    "Akash Patel",
    "Ananya Iyer",
    "Anjali Menon",
    "Arjun Reddy",
    "Asha Nair",
    "Bhavya Rao",
    "Chandra Sekar",
    "Deepak Kumar",
    "Divya Pillai",
    "Gautham Raj",
    "Gayathri Devi",
    "Gokul Nath",
    "Harini Subramani",
    "Harish Venkat",
    "Indira Lakshmi",
    "Ishaan Verma",
    "Janani Murali",
    "Jayanth Kumar",
    "Kavya Ramesh",
    "Karthik Eswar",
    "Keerthana Balaji",
    "Kiran Bedi",
    "Lakshmi Priya",
    "Madhav Rao",
    "Meena Kumari",
    "Mohan Das",
    "Mukesh Anand",
    "Naveen Chandra",
    "Nithya Shree",
    "Pavithra Devi",
    "Pooja Hegde",
    "Prakash Raj",
    "Pranav Teja",
    "Preethi Menon",
    "Priya Darshini",
    "Raghav Iyer",
    "Rajesh Khanna",
    "Ramya Krishnan",
    "Ranjith Kumar",
    "Revathi Sankar",
    "Rohan Joshi",
    "Sahana Bhat",
    "Sandeep Reddy",
    "Sangeetha Ravi",
    "Sanjay Dutt",
    "Saranya Mohan",
    "Sathish Kumar",
    "Shalini Gupta",
    "Shreya Ghosh",
    "Siva Prasad",
    "Sneha Kapoor",
    "Sowmya Narayan",
    "Srinivas Murthy",
    "Sudha Rani",
    "Surya Prakash",
    "Tanvi Desai",
    "Uma Maheswari",
    "Varun Dhawan",
    "Vidya Balan",
    "Vignesh Shivan",
    "Vinay Kumar",
    "Yamini Devi",
];

/// Seeds the store with the admin account and the student roster.
#[derive(Clone)]
pub struct SeedService {
    users: UserRepository,
    polls: PollRepository,
    responses: ResponseRepository,
}

impl SeedService {
    /// Create a new seed service.
    #[must_use]
    pub const fn new(
        users: UserRepository,
        polls: PollRepository,
        responses: ResponseRepository,
    ) -> Self {
        Self {
            users,
            polls,
            responses,
        }
    }

    /// Populate the store on first run.
    ///
    /// A previous run is detected by the presence of the user
    /// collection, in which case nothing happens; an existing roster is
    /// never merged or upgraded. Returns whether seeding ran.
    pub fn seed(&self) -> AppResult<bool> {
        if self.users.exists()? {
            return Ok(false);
        }

        let mut users = vec![User {
            roll_number: ADMIN_ROLL_NUMBER.to_string(),
            name: ADMIN_NAME.to_string(),
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
            is_admin: true,
            has_completed_setup: false,
        }];

        let mut names = NAME_POOL.iter();
        for roll in FIRST_ROLL..=LAST_ROLL {
            if roll == DISCONTINUED_ROLL {
                continue;
            }
            // The pool is larger than the roster, so this never runs dry.
            let name = names.next().copied().unwrap_or("Student");
            users.push(User {
                roll_number: roll.to_string(),
                name: name.to_string(),
                email: format!("student{roll}@college.edu"),
                password: format!("pass{roll}123"),
                is_admin: false,
                has_completed_setup: false,
            });
        }

        self.users.save_all(&users)?;
        self.polls.save_all(&[])?;
        self.responses.save_all(&[])?;

        info!(students = users.len() - 1, "seeded first-run roster");
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pollbox_db::test_utils::TestStore;
    use std::collections::HashSet;

    fn service(store: &TestStore) -> SeedService {
        SeedService::new(store.users(), store.polls(), store.responses())
    }

    #[test]
    fn first_run_seeds_admin_and_sixty_students() {
        let store = TestStore::new();
        assert!(service(&store).seed().unwrap());

        let users = store.users().all().unwrap();
        let admins: Vec<_> = users.iter().filter(|u| u.is_admin).collect();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].roll_number, "tutor");

        let students: Vec<_> = users.iter().filter(|u| !u.is_admin).collect();
        assert_eq!(students.len(), 60);
        assert!(students.iter().all(|s| !s.has_completed_setup));
        assert!(!users.iter().any(|u| u.roll_number == "13"));

        let rolls: HashSet<&str> = users.iter().map(|u| u.roll_number.as_str()).collect();
        assert_eq!(rolls.len(), users.len());

        let names: HashSet<&str> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), students.len());

        assert!(store.polls().all().unwrap().is_empty());
        assert!(store.responses().all().unwrap().is_empty());
    }

    #[test]
    fn second_run_is_a_no_op() {
        let store = TestStore::new();
        let seed = service(&store);
        assert!(seed.seed().unwrap());

        // Mutate the roster, then seed again: nothing may be touched.
        let mut users = store.users().all().unwrap();
        users.truncate(5);
        store.users().save_all(&users).unwrap();

        assert!(!seed.seed().unwrap());
        assert_eq!(store.users().all().unwrap().len(), 5);
    }

    #[test]
    fn seeding_skips_when_users_key_holds_anything() {
        let store = TestStore::new();
        store.users().save_all(&[]).unwrap();

        assert!(!service(&store).seed().unwrap());
        assert!(store.users().all().unwrap().is_empty());
    }
}
