//! Two machines sharing one pump, choreographed through their state-changed
//! notifications.
//!
//! Every notification appends to a shared trace, and handlers post follow-up
//! messages to both machines mid-notification. The final trace proves that
//! delivery is globally FIFO: messages posted during processing always run
//! after everything already queued, and never interleave mid-transition.

use pumpstate::{message_enum, state_enum, Message, MessagePump, State, StateMachine};
use std::cell::RefCell;
use std::rc::Rc;

state_enum! {
    enum StatesA {
        NoneA,
        AS0,
        AS1,
        AS2,
        AS3,
        AS4,
        AS5,
    }
}

message_enum! {
    enum MessagesA {
        AM0,
        AM1,
        AM2,
        AM3,
        AM4,
        AM5,
        AM6,
    }
}

state_enum! {
    enum StatesB {
        NoneB,
        BS0,
        BS1,
        BS2,
        BS3,
        BS4,
        BS5,
    }
}

message_enum! {
    enum MessagesB {
        BM0,
        BM1,
        BM2,
        BM3,
        BM4,
        BM5,
        BM6,
    }
}

type Trace = Rc<RefCell<String>>;

fn machine_a(pump: &Rc<MessagePump>) -> Rc<StateMachine<StatesA, MessagesA, Trace>> {
    let machine = StateMachine::new(Rc::clone(pump), StatesA::NoneA, "machine-a");
    machine.add(StatesA::NoneA, MessagesA::AM0, StatesA::AS0).unwrap();
    machine.add(StatesA::AS0, MessagesA::AM1, StatesA::AS1).unwrap();
    machine.add(StatesA::AS1, MessagesA::AM2, StatesA::AS2).unwrap();
    machine.add(StatesA::AS2, MessagesA::AM3, StatesA::AS3).unwrap();
    machine.add(StatesA::AS3, MessagesA::AM4, StatesA::AS4).unwrap();
    machine.add(StatesA::AS4, MessagesA::AM5, StatesA::AS5).unwrap();
    machine.add(StatesA::AS5, MessagesA::AM6, StatesA::AS0).unwrap();
    machine
}

fn machine_b(pump: &Rc<MessagePump>) -> Rc<StateMachine<StatesB, MessagesB, Trace>> {
    let machine = StateMachine::new(Rc::clone(pump), StatesB::NoneB, "machine-b");
    machine.add(StatesB::NoneB, MessagesB::BM0, StatesB::BS0).unwrap();
    machine.add(StatesB::BS0, MessagesB::BM1, StatesB::BS1).unwrap();
    machine.add(StatesB::BS1, MessagesB::BM2, StatesB::BS2).unwrap();
    machine.add(StatesB::BS2, MessagesB::BM3, StatesB::BS3).unwrap();
    machine.add(StatesB::BS3, MessagesB::BM4, StatesB::BS4).unwrap();
    machine.add(StatesB::BS4, MessagesB::BM5, StatesB::BS5).unwrap();
    machine.add(StatesB::BS5, MessagesB::BM6, StatesB::BS0).unwrap();
    machine
}

#[test]
fn two_machines_one_pump_notify_in_fifo_order() {
    let pump = MessagePump::new();
    let a = machine_a(&pump);
    let b = machine_b(&pump);

    {
        let a_handle = Rc::clone(&a);
        let b_handle = Rc::clone(&b);
        a.subscribe_state_changed(move |event| {
            event
                .payload
                .borrow_mut()
                .push_str(&format!("{} ", event.new_state.name()));

            match event.new_state {
                StatesA::AS0 => {
                    b_handle
                        .post_message(MessagesB::BM0, Rc::clone(&event.payload))
                        .unwrap();
                    b_handle
                        .post_message(MessagesB::BM1, Rc::clone(&event.payload))
                        .unwrap();
                }
                StatesA::AS2 => {
                    a_handle
                        .post_message(MessagesA::AM3, Rc::clone(&event.payload))
                        .unwrap();
                    b_handle
                        .post_message(MessagesB::BM3, Rc::clone(&event.payload))
                        .unwrap();
                }
                StatesA::AS3 => {
                    a_handle
                        .post_message(MessagesA::AM4, Rc::clone(&event.payload))
                        .unwrap();
                }
                StatesA::AS4 => {
                    a_handle
                        .post_message(MessagesA::AM4, Rc::clone(&event.payload))
                        .unwrap();
                }
                StatesA::AS5 => {
                    b_handle
                        .post_message(MessagesB::BM4, Rc::clone(&event.payload))
                        .unwrap();
                }
                _ => {}
            }
        });
    }

    {
        let a_handle = Rc::clone(&a);
        let b_handle = Rc::clone(&b);
        b.subscribe_state_changed(move |event| {
            event
                .payload
                .borrow_mut()
                .push_str(&format!("{} ", event.new_state.name()));

            match event.new_state {
                StatesB::BS1 => {
                    b_handle
                        .post_message(MessagesB::BM2, Rc::clone(&event.payload))
                        .unwrap();
                }
                StatesB::BS2 => {
                    a_handle
                        .post_message(MessagesA::AM1, Rc::clone(&event.payload))
                        .unwrap();
                    a_handle
                        .post_message(MessagesA::AM2, Rc::clone(&event.payload))
                        .unwrap();
                }
                StatesB::BS3 => {
                    a_handle
                        .post_message(MessagesA::AM5, Rc::clone(&event.payload))
                        .unwrap();
                }
                _ => {}
            }
        });
    }

    a.on_bad_transition(|fault| {
        fault.payload().borrow_mut().push_str(&format!(
            "Fault:{};{} ",
            fault.current_state().name(),
            fault.message().name()
        ));
    });
    b.on_bad_transition(|fault| {
        fault.payload().borrow_mut().push_str(&format!(
            "Fault:{};{} ",
            fault.current_state().name(),
            fault.message().name()
        ));
    });

    let trace: Trace = Rc::new(RefCell::new(String::new()));
    a.post_message(MessagesA::AM0, Rc::clone(&trace)).unwrap();

    assert_eq!(
        *trace.borrow(),
        "AS0 BS0 BS1 BS2 AS1 AS2 AS3 BS3 AS4 AS5 Fault:AS5;AM4 BS4 "
    );
    assert_eq!(a.state(), StatesA::AS5);
    assert_eq!(b.state(), StatesB::BS4);
    assert!(pump.is_empty());
}
