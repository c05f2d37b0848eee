use std::{cell::RefCell, rc::Rc};

use log::{LevelFilter, info, warn};
use rusty_kit::{
    event::{BoxError, Registry},
    logging::ChannelLogger,
    seq::{make_iterator, sequences_equal},
};

/// Events carried on the demo bus.
#[derive(Debug)]
enum Activity {
    Hired { name: String, role: String },
    LoggedIn { name: String },
}

/// Keeps the staff list current by listening for hires.
struct StaffDirectory {
    staff: Rc<RefCell<Vec<String>>>,
}

impl StaffDirectory {
    fn new(bus: &mut Registry<Activity>) -> Self {
        let staff = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&staff);
        bus.subscribe("staff.hired", move |activity| {
            if let Some(Activity::Hired { name, role }) = activity {
                info!("directory: added {name} ({role})");
                sink.borrow_mut().push(name.clone());
            }
            Ok(())
        });
        Self { staff }
    }

    fn names(&self) -> Vec<String> {
        self.staff.borrow().clone()
    }
}

/// Rejects logins from anyone the directory does not know.
struct LoginGate;

impl LoginGate {
    fn new(bus: &mut Registry<Activity>, directory: &StaffDirectory) -> Self {
        let staff = Rc::clone(&directory.staff);
        bus.subscribe("session.login", move |activity| -> Result<(), BoxError> {
            let Some(Activity::LoggedIn { name }) = activity else {
                return Ok(());
            };
            if staff.borrow().contains(name) {
                info!("login: welcome {name}");
                Ok(())
            } else {
                Err(format!("unknown user `{name}`").into())
            }
        });
        Self
    }
}

fn main() {
    let receiver = match ChannelLogger::install(LevelFilter::Debug) {
        Ok(receiver) => receiver,
        Err(err) => {
            eprintln!("logger: {err}");
            return;
        }
    };

    let mut bus = Registry::new();
    let directory = StaffDirectory::new(&mut bus);
    let _gate = LoginGate::new(&mut bus, &directory);

    let hires = [("ada", "engineer"), ("grace", "admiral")];
    for (name, role) in hires {
        let hired = Activity::Hired {
            name: name.into(),
            role: role.into(),
        };
        if let Err(err) = bus.publish("staff.hired", &hired) {
            warn!("hire failed: {err}");
        }
    }

    for name in ["grace", "mallory"] {
        let login = Activity::LoggedIn { name: name.into() };
        if let Err(err) = bus.publish("session.login", &login) {
            warn!("login refused: {err}");
        }
    }

    let expected = ["ada", "grace"];
    let names = directory.names();
    match sequences_equal(make_iterator(&names), make_iterator(&expected)) {
        Ok(true) => info!("directory matches expected roster"),
        Ok(false) => warn!("directory differs from expected roster"),
        Err(err) => warn!("roster check failed: {err}"),
    }

    for message in receiver.try_iter() {
        println!("{:<5} - {}", message.level, message.message);
    }
}
