//! Message bus tests.

use std::cell::RefCell;
use std::rc::Rc;

use delve_engine::{GameMessage, MessageBus, MessageKind};

#[test]
fn subscribers_see_messages_in_order() {
    let mut bus = MessageBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    bus.subscribe(move |msg| sink.borrow_mut().push(msg.to_string()));

    let batch = [
        GameMessage::new(MessageKind::Combat, "one"),
        GameMessage::new(MessageKind::Wander, "two"),
    ];
    bus.emit_all(&batch);
    bus.emit(&GameMessage::new(MessageKind::System, "three"));
    assert_eq!(*seen.borrow(), vec!["one", "two", "three"]);
}

#[test]
fn unsubscribed_listeners_go_quiet() {
    let mut bus = MessageBus::new();
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    let id = bus.subscribe(move |_| *counter.borrow_mut() += 1);

    bus.emit(&GameMessage::new(MessageKind::System, "hello"));
    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));
    bus.emit(&GameMessage::new(MessageKind::System, "anyone?"));
    assert_eq!(*count.borrow(), 1);
    assert_eq!(bus.subscriber_count(), 0);
}
