use mockgen::{
    generate_all, go_interface, Declarations, Error, Generator, Interface, Method, Options,
    Parameter, Shape, TypeExpr,
};

#[test]
fn generates_every_interface_in_name_order() {
    let decls = Declarations::new()
        .with_interface(go_interface!(Writer {
            Write(p []byte) (int, error);
        }))
        .with_interface(go_interface!(Closer {
            Close() error;
        }))
        .with_interface(go_interface!(Reader {
            Read(p []byte) (int, error);
        }));
    let options = Options::new().package("mocks");

    let generated = generate_all(&decls, &options);

    let names = generated
        .iter()
        .map(|g| g.interface.as_str())
        .collect::<Vec<_>>();
    assert_eq!(vec!["Closer", "Reader", "Writer"], names);

    for g in &generated {
        let expected = Generator::find(&g.interface, &decls, &options)
            .unwrap()
            .generate();

        assert_eq!(Ok(expected), g.output);
    }
}

#[test]
fn errors_are_reported_per_interface() {
    let broken = Interface::new("Broken").with_method(
        Method::new("Get")
            .with_param(Parameter::named(
                "values",
                TypeExpr::variadic(TypeExpr::named("string")),
            ))
            .with_param(Parameter::unnamed(TypeExpr::named("int"))),
    );
    let decls = Declarations::new()
        .with_interface(broken)
        .with_interface(go_interface!(Fine {
            Get() error;
        }));
    let options = Options::new();

    let generated = generate_all(&decls, &options);

    assert_eq!(2, generated.len());

    assert_eq!("Broken", generated[0].interface);
    assert_eq!(
        Err(Error::UnsupportedShape {
            interface: "Broken".into(),
            method: "Get".into(),
            shape: Shape::MisplacedVariadic("...string".into()),
        }),
        generated[0].output
    );

    assert_eq!("Fine", generated[1].interface);
    assert!(generated[1]
        .output
        .as_ref()
        .unwrap()
        .starts_with("// Fine is an autogenerated mock type for the Fine type\n"));
}

#[test]
fn nothing_to_generate() {
    let decls = Declarations::new();
    let options = Options::new();

    assert!(generate_all(&decls, &options).is_empty());
}
