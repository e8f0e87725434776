use bird_vna::{
    scpi::{ScpiError, Value},
    vna::{DataFormat, Field, TriggerScope},
    Error, MockTransport, Transport, TransportError, Vna,
};

#[test]
fn context_is_shared_by_every_namespace() {
    let mut vna = Vna::with_transport(MockTransport::new());
    vna.set_channel(2).unwrap();
    vna.set_trace(3).unwrap();
    assert_eq!(vna.sense().context().channel, Some(2));
    assert_eq!(vna.calculate().context().trace, Some(3));

    vna.sense().frequency().set_cw(1e6).unwrap();
    vna.calculate().set_format(DataFormat::Phase).unwrap();
    vna.set_channel(4).unwrap();
    vna.initiate().immediate().unwrap();
    assert_eq!(
        vna.transport().sent(),
        ["SENS2:FREQ 1000000.0", "CALC2:TRAC3:FORM PHAS", "INIT4"]
    );
}

#[test]
fn unset_context_fails_before_io() {
    let mut vna = Vna::with_transport(MockTransport::new());
    match vna.calculate().marker().x() {
        Err(Error::ContextUnset(field)) => assert_eq!(field, Field::Channel),
        other => panic!("unexpected {:?}", other),
    }
    vna.set_channel(1).unwrap();
    let err = vna.calculate().marker().x().unwrap_err();
    assert!(matches!(err, Error::ContextUnset(Field::Marker)));
    assert_eq!(
        err.to_string(),
        "marker is not set, set it on the driver before using this command"
    );
    assert!(vna.transport().sent().is_empty());
}

#[test]
fn invalid_enum_strings_are_rejected() {
    let err = "sideways".parse::<TriggerScope>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid trigger scope 'sideways', expected one of ACT, ALL"
    );

    let mut vna = Vna::with_transport(MockTransport::new());
    vna.set_channel(1).unwrap();
    vna.set_trace(1).unwrap();
    assert!(matches!(
        vna.set("calculate.format", "bogus"),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        vna.set("sense.frequency.center", f64::INFINITY),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(vna.transport().sent().is_empty());
}

#[test]
fn path_access_round_trips() {
    let mut vna = Vna::with_transport(MockTransport::new());
    vna.set_channel(1).unwrap();
    vna.set("sense.sweep.points", Value::Int(401)).unwrap();
    vna.set("initiate.continuous", false).unwrap();
    vna.set("trigger.source", "bus").unwrap();
    assert_eq!(vna.get("sense.sweep.points").unwrap(), Value::Int(401));
    assert_eq!(vna.get("initiate.continuous").unwrap(), Value::Bool(false));
    assert_eq!(vna.get("trigger.source").unwrap(), Value::Text("BUS".into()));

    vna.execute("sense.correction.collection.thru", &[Value::Int(1), Value::Int(2)])
        .unwrap();
    assert!(matches!(
        vna.execute("sense.correction.collection.thru", &[Value::Int(1)]),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        vna.set("sense.frequency.data", vec![1.0]),
        Err(Error::Unsupported { .. })
    ));
    assert!(matches!(vna.get("sense.bogus"), Err(Error::UnknownCommand(_))));
}

#[test]
fn transport_failure_is_distinct_from_a_response() {
    let mut vna = Vna::with_transport(MockTransport::new());
    vna.set_channel(1).unwrap();
    vna.transport_mut().fail_next("connection reset");
    match vna.sense().frequency().center() {
        Err(Error::Transport(TransportError::Io(e))) => {
            assert_eq!(e.to_string(), "connection reset")
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(
        vna.sense().frequency().center(),
        Err(Error::Transport(TransportError::NoResponse(_)))
    ));
}

#[test]
fn unparsable_response() {
    let mut vna = Vna::with_transport(
        MockTransport::new().with_response("SENS1:SWE:POIN?", "many"),
    );
    vna.set_channel(1).unwrap();
    match vna.sense().sweep().points() {
        Err(Error::Parse { command, response, .. }) => {
            assert_eq!(command, "SENS1:SWE:POIN?");
            assert_eq!(response, "many");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn error_queue_is_drained_and_classified() {
    let mut vna = Vna::with_transport(
        MockTransport::new()
            .with_response("SYST:ERR?", "-113,\"Undefined header\"")
            .with_response("SYST:ERR?", "-222,\"Data out of range\"")
            .with_response("SYST:ERR?", "+0,\"No error\""),
    );
    let errors = vna.get_error_list().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].class(), Some(ScpiError::CommandError));
    assert_eq!(errors[1].class(), Some(ScpiError::ExecutionError));
    assert!(vna.get_error_list().unwrap().is_empty());
}

#[test]
fn error_queue_that_never_empties_is_bounded() {
    let mut vna = Vna::with_transport(
        MockTransport::new().with_response("SYST:ERR?", "-350,\"Queue overflow\""),
    )
    .with_error_queue_limit(10);
    match vna.get_error_list() {
        Err(Error::ErrorQueueUnterminated { limit, errors }) => {
            assert_eq!(limit, 10);
            assert!(errors.iter().all(|e| e.code == -350));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(vna.transport().sent().len(), 10);
}

#[test]
fn unreadable_error_entry_keeps_collected_errors() {
    let mut vna = Vna::with_transport(
        MockTransport::new()
            .with_response("SYST:ERR?", "-222,\"Data out of range\"")
            .with_response("SYST:ERR?", "garbled"),
    );
    match vna.get_error_list() {
        Err(Error::ErrorQueueMalformed { response, errors }) => {
            assert_eq!(response, "garbled");
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].code, -222);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(vna.transport().sent(), ["SYST:ERR?", "SYST:ERR?"]);
}

#[test]
fn closed_transport() {
    let mut vna = Vna::with_transport(MockTransport::new());
    vna.transport_mut().close().unwrap();
    assert!(matches!(
        vna.reset(),
        Err(Error::Transport(TransportError::Closed))
    ));
}
