//! Two Machines, One Pump
//!
//! This example demonstrates the shared-pump choreography pattern: two state
//! machines bound to the same pump exchange messages from their
//! `StateChanged` handlers. Because posting from inside a notification
//! enqueues instead of recursing, the rally below runs strictly in FIFO
//! order on a flat call stack.
//!
//! Run with: cargo run --example two_machines

use pumpstate::{message_enum, state_enum, MachineError, MessagePump, StateMachine};
use std::rc::Rc;

state_enum! {
    enum PlayerState {
        Ready,
    }
}

message_enum! {
    enum PlayerMessage {
        Ball,
    }
}

type Player = Rc<StateMachine<PlayerState, PlayerMessage, u32>>;

fn player(pump: &Rc<MessagePump>, name: &str) -> Player {
    let machine = StateMachine::new(Rc::clone(pump), PlayerState::Ready, name);
    // A self-transition: catching the ball keeps the player ready.
    machine
        .add(PlayerState::Ready, PlayerMessage::Ball, PlayerState::Ready)
        .expect("fresh machine has no registrations");
    machine
}

fn rally(hitter: &Player, receiver: &Player) {
    let receiver = Rc::clone(receiver);
    let name = hitter.name().to_string();
    hitter.subscribe_state_changed(move |event| {
        println!("  {} returns the ball ({} bounces left)", name, event.payload);
        if event.payload > 0 {
            receiver
                .post_message(PlayerMessage::Ball, event.payload - 1)
                .expect("rally messages always have a transition");
        }
    });
}

fn main() -> Result<(), MachineError> {
    println!("=== Two Machines, One Pump ===\n");

    let pump = MessagePump::new();
    let ping = player(&pump, "ping");
    let pong = player(&pump, "pong");

    rally(&ping, &pong);
    rally(&pong, &ping);

    println!("Serving with 6 bounces:");
    ping.post_message(PlayerMessage::Ball, 6)?;

    println!("\nRally complete, queue drained: {}", pump.is_empty());
    println!("\n=== Example Complete ===");
    Ok(())
}
