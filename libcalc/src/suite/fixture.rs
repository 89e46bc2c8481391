use std::cell::OnceCell;
use crate::error::{Failure, HookKind};
use crate::helpers::guarded;

pub type Setup<F> = Box<dyn Fn() -> Result<F, Failure>>;

/// State shared by every case of one suite run.
///
/// The before-all hook runs the first time a case asks for the fixture, so a
/// run whose cases are all ignored never builds it. A failed setup is
/// remembered and handed to every later case instead of being retried.
pub struct Fixture<'s, F> {
    setup: &'s dyn Fn() -> Result<F, Failure>,
    cell: OnceCell<Result<F, Failure>>,
}

impl<'s, F> Fixture<'s, F> {
    pub fn new(setup: &'s dyn Fn() -> Result<F, Failure>) -> Fixture<'s, F> {
        Fixture {
            setup: setup,
            cell: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Result<&F, Failure> {
        let setup = self.setup;
        let built = self.cell.get_or_init(|| {
            debug!("running before-all hook");
            guarded(setup).map_err(|failure| Failure::hook(HookKind::BeforeAll, failure))
        });
        match *built {
            Ok(ref fixture) => Ok(fixture),
            Err(ref failure) => Err(Failure::Fixture(Box::new(failure.clone()))),
        }
    }

    /// Ends the run's ownership of the fixture; `None` if setup never ran or failed.
    pub fn into_inner(self) -> Option<F> {
        self.cell.into_inner().and_then(Result::ok)
    }
}
