mod trip;

pub(crate) use trip::{trip_days, TripInputs, TripPlan};

#[cfg(test)]
mod tests;
