//! Complaint-contact directory
//!
//! Pollution-control authorities per Indian state, plus the National Green
//! Tribunal which is appended to every list. The state is picked from a
//! reverse-geocoded display name.

use serde::Serialize;

/// State used when a display name names none of the covered states.
pub const DEFAULT_STATE: &str = "Delhi";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthorityKind {
    Government,
    Legal,
}

/// One organisation a noise complaint can be filed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Authority {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub website: &'static str,
    pub kind: AuthorityKind,
}

const fn government(
    id: u32,
    name: &'static str,
    description: &'static str,
    address: &'static str,
    phone: &'static str,
    email: &'static str,
    website: &'static str,
) -> Authority {
    Authority {
        id,
        name,
        description,
        address,
        phone,
        email,
        website,
        kind: AuthorityKind::Government,
    }
}

const DELHI: &[Authority] = &[
    government(
        1,
        "Delhi Pollution Control Committee",
        "State-level authority for monitoring and controlling environmental pollution in Delhi.",
        "4th Floor, ISBT Building, Kashmere Gate, Delhi-110006",
        "011-43102256",
        "dpcc@nic.in",
        "https://dpcc.delhigovt.nic.in",
    ),
    government(
        2,
        "Central Pollution Control Board",
        "National level organization for monitoring and controlling environmental pollution.",
        "Parivesh Bhawan, East Arjun Nagar, Delhi-110032",
        "011-43102030",
        "cpcb@nic.in",
        "https://cpcb.nic.in",
    ),
];

const MAHARASHTRA: &[Authority] = &[government(
    3,
    "Maharashtra Pollution Control Board",
    "State-level environmental protection agency for Maharashtra.",
    "Kalpataru Point, Sion, Mumbai-400022",
    "022-24020781",
    "mpcb@mpcb.gov.in",
    "https://mpcb.gov.in",
)];

const KARNATAKA: &[Authority] = &[government(
    4,
    "Karnataka State Pollution Control Board",
    "Environmental protection authority for Karnataka state.",
    "Church Street, Bengaluru-560001",
    "080-25589112",
    "kspcb@kspcb.gov.in",
    "https://kspcb.gov.in",
)];

const TAMIL_NADU: &[Authority] = &[government(
    5,
    "Tamil Nadu Pollution Control Board",
    "State pollution monitoring and control authority for Tamil Nadu.",
    "76, Mount Salai, Guindy, Chennai-600032",
    "044-22353134",
    "tnpcb@tn.nic.in",
    "https://tnpcb.gov.in",
)];

const WEST_BENGAL: &[Authority] = &[government(
    6,
    "West Bengal Pollution Control Board",
    "State environmental regulatory authority for West Bengal.",
    "Paribesh Bhawan, 10A Block, LA, Sector III, Kolkata-700098",
    "033-23355073",
    "wbpcb@wbpcb.gov.in",
    "https://wbpcb.gov.in",
)];

const TELANGANA: &[Authority] = &[government(
    7,
    "Telangana State Pollution Control Board",
    "Environmental protection and monitoring body for Telangana.",
    "Paryavarana Bhavan, A-3, IE, Sanathnagar, Hyderabad-500018",
    "040-23887500",
    "tspcb@telangana.gov.in",
    "https://tspcb.cgg.gov.in",
)];

/// Appended to every state's list.
pub const NATIONAL_GREEN_TRIBUNAL: Authority = Authority {
    id: 8,
    name: "National Green Tribunal",
    description:
        "Dedicated environmental court handling cases related to environmental protection.",
    address: "Copernicus Marg, New Delhi-110001",
    phone: "011-23043501",
    email: "filing.ngt@nic.in",
    website: "https://greentribunal.gov.in",
    kind: AuthorityKind::Legal,
};

/// Covered states, in lookup order.
pub static STATES: &[(&str, &[Authority])] = &[
    ("Delhi", DELHI),
    ("Maharashtra", MAHARASHTRA),
    ("Karnataka", KARNATAKA),
    ("Tamil Nadu", TAMIL_NADU),
    ("West Bengal", WEST_BENGAL),
    ("Telangana", TELANGANA),
];

fn authorities_in(state: &str) -> Option<&'static [Authority]> {
    STATES
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, list)| *list)
}

/// Pick the covered state named in a `", "`-separated display name.
///
/// The first component that exactly matches a covered state wins.
pub fn resolve_state(display_name: &str) -> &'static str {
    display_name
        .split(", ")
        .find_map(|part| STATES.iter().find(|(name, _)| *name == part).map(|(name, _)| *name))
        .unwrap_or(DEFAULT_STATE)
}

/// Authorities for `state` followed by the National Green Tribunal.
///
/// An unknown state gets the default state's list.
pub fn contacts_for_state(state: &str) -> Vec<Authority> {
    let mut contacts = authorities_in(state)
        .or_else(|| authorities_in(DEFAULT_STATE))
        .unwrap_or_default()
        .to_vec();
    contacts.push(NATIONAL_GREEN_TRIBUNAL);
    contacts
}

/// Convenience: resolve the state from a display name and list its contacts.
pub fn contacts_for_place(display_name: &str) -> (&'static str, Vec<Authority>) {
    let state = resolve_state(display_name);
    (state, contacts_for_state(state))
}
