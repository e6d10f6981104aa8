pub mod claimed_number;
pub mod donation;
pub mod fundraiser_settings;

pub use claimed_number::Entity as ClaimedNumber;
pub use donation::Entity as Donation;
pub use fundraiser_settings::Entity as FundraiserSettings;
