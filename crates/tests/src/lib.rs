#[cfg(test)]
mod common;

#[cfg(test)]
mod session_tests;

#[cfg(test)]
mod case_tests;

#[cfg(test)]
mod evidence_tests;

#[cfg(test)]
mod report_tests;

#[cfg(test)]
mod user_tests;

#[cfg(test)]
mod dashboard_tests;
