//! Multi-step form support.
//!
//! A form declares its steps and, for each step, which required fields are
//! still blank. [`WizardState`] only moves forward when the current step is
//! complete, so the "next" control is disabled exactly when
//! [`WizardForm::step_complete`] is false.

/// A form split into sequential steps.
pub trait WizardForm {
    /// Step titles, in order. The length is the number of steps.
    const STEPS: &'static [&'static str];

    /// Names of the required fields of `step` that are still empty.
    /// Steps past the end have no required fields.
    fn missing_fields(&self, step: usize) -> Vec<&'static str>;

    fn step_complete(&self, step: usize) -> bool {
        self.missing_fields(step).is_empty()
    }

    fn is_complete(&self) -> bool {
        (0..Self::STEPS.len()).all(|step| self.step_complete(step))
    }

    /// Required fields still empty across every step.
    fn all_missing_fields(&self) -> Vec<&'static str> {
        (0..Self::STEPS.len())
            .flat_map(|step| self.missing_fields(step))
            .collect()
    }
}

/// Position within a wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardState {
    step: usize,
    total: usize,
}

impl WizardState {
    pub fn new(total: usize) -> Self {
        Self {
            step: 0,
            total: total.max(1),
        }
    }

    pub fn for_form<F: WizardForm>() -> Self {
        Self::new(F::STEPS.len())
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_first(&self) -> bool {
        self.step == 0
    }

    pub fn is_last(&self) -> bool {
        self.step + 1 == self.total
    }

    /// Whether the "next" control is enabled for `form`.
    pub fn can_advance<F: WizardForm>(&self, form: &F) -> bool {
        !self.is_last() && form.step_complete(self.step)
    }

    /// Advance one step if the current step is complete. Returns whether
    /// the step changed.
    pub fn next<F: WizardForm>(&mut self, form: &F) -> bool {
        if self.can_advance(form) {
            self.step += 1;
            true
        } else {
            false
        }
    }

    pub fn back(&mut self) -> bool {
        if self.step > 0 {
            self.step -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }

    /// Route a form submission. Before the last step it only advances
    /// (when the step is complete) and returns `false`; on the last step it
    /// returns `true` and the caller posts.
    pub fn submit_or_advance<F: WizardForm>(&mut self, form: &F) -> bool {
        if self.is_last() {
            return true;
        }
        self.next(form);
        false
    }
}

/// Push `name` when `value` is blank.
pub(crate) fn require(missing: &mut Vec<&'static str>, name: &'static str, value: &str) {
    if crate::common::is_blank(value) {
        missing.push(name);
    }
}
