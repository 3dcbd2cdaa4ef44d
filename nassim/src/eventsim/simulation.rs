use super::scheduler::Scheduler;
use super::Time;
use log::{debug, trace};

/// An event that knows how to apply itself to the world `T`.
pub trait Process<T>: Sized {
    type Error;
    fn process(self, time: Time, world: &mut T, scheduler: &mut Scheduler<Self>) -> Result<(), Self::Error>;
}

pub type Observer<E> = Box<dyn FnMut(Time, &E)>;

pub struct Simulation<T, E> {
    pub world: T,
    pub scheduler: Scheduler<E>,
    observer: Option<Observer<E>>,
    processed: usize,
}

impl<T, E: Process<T>> Simulation<T, E> {
    pub fn new(world: T) -> Self {
        Simulation::new_with_scheduler(world, Scheduler::new())
    }

    pub fn new_with_scheduler(world: T, scheduler: Scheduler<E>) -> Self {
        Simulation {
            world: world,
            scheduler: scheduler,
            observer: None,
            processed: 0,
        }
    }

    pub fn time(&self) -> Time { self.scheduler.time }

    pub fn processed(&self) -> usize { self.processed }

    /// Called with every event just before it is processed.
    pub fn set_observer(&mut self, observer: Observer<E>) {
        self.observer = Some(observer);
    }

    pub fn step(&mut self) -> Result<bool, E::Error> {
        match self.scheduler.pop_min() {
            Some((time, ev)) => {
                trace!("t={} processing event #{} ({} pending)", time, self.processed, self.scheduler.len());
                if let Some(ref mut observer) = self.observer {
                    observer(time, &ev);
                }
                self.processed += 1;
                ev.process(time, &mut self.world, &mut self.scheduler)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Processes events until the queue is empty.
    pub fn run(&mut self) -> Result<usize, E::Error> {
        while self.step()? {}
        debug!("simulation finished at t={} after {} events", self.time(), self.processed);
        Ok(self.processed)
    }

    pub fn into_world(self) -> T {
        self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Counts down, rescheduling itself a fixed step later each time.
    struct Countdown(u32);

    impl Process<Vec<Time>> for Countdown {
        type Error = ();
        fn process(self, time: Time, world: &mut Vec<Time>, scheduler: &mut Scheduler<Self>) -> Result<(), ()> {
            world.push(time);
            if self.0 > 0 {
                scheduler.push(time + 10, Countdown(self.0 - 1)).map_err(|_| ())?;
            }
            Ok(())
        }
    }

    #[test]
    fn runs_until_queue_is_empty() {
        let mut sim = Simulation::new(Vec::new());
        sim.scheduler.push(5, Countdown(3)).unwrap();
        sim.scheduler.push(7, Countdown(0)).unwrap();
        assert_eq!(sim.run(), Ok(5));
        assert_eq!(sim.time(), 35);
        assert_eq!(sim.into_world(), vec![5, 7, 15, 25, 35]);
    }

    #[test]
    fn observer_sees_nondecreasing_times() {
        use std::cell::RefCell;
        use std::rc::Rc;
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut sim = Simulation::new(Vec::new());
        sim.set_observer(Box::new(move |t, _ev: &Countdown| log.borrow_mut().push(t)));
        sim.scheduler.push(40, Countdown(1)).unwrap();
        sim.scheduler.push(0, Countdown(5)).unwrap();
        sim.run().unwrap();
        let seen = seen.borrow();
        assert_eq!(seen.len(), 8);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }
}
