use super::*;

/// The compiled core program (`Elm.Main`) handed in by the host page.
pub(super) struct ElmProgram {
    program: JsValue,
}

impl ElmProgram {
    pub(super) fn new(program: JsValue) -> Self {
        Self { program }
    }
}

impl CoreApplication for ElmProgram {
    fn launch(
        &self,
        flags: &StartupFlags,
        mount: &MountTarget,
    ) -> Result<Box<dyn ApplicationHandle>, BootError> {
        if self.program.is_undefined() || self.program.is_null() {
            return Err(BootError::CoreLaunch(
                "core program is not defined".to_string(),
            ));
        }
        let flags = js_sys::JSON::parse(&flags.to_json()?).map_err(|error| {
            BootError::CoreLaunch(format!(
                "startup flags rejected: {}",
                describe_js_error(&error)
            ))
        })?;

        let app = match mount {
            MountTarget::Fullscreen => {
                call_method(&self.program, FULLSCREEN_METHOD, &[flags])
            }
            MountTarget::Embed { element_id } => {
                let node = document()
                    .and_then(|document| document.get_element_by_id(element_id))
                    .ok_or_else(|| BootError::MissingMountElement(element_id.clone()))?;
                call_method(&self.program, EMBED_METHOD, &[node.into(), flags])
            }
        }
        .map_err(BootError::CoreLaunch)?;

        Ok(Box::new(ElmPorts { app }))
    }
}

struct ElmPorts {
    app: JsValue,
}

impl ApplicationHandle for ElmPorts {
    fn subscribe(&mut self, port: OutboundPort, mut listener: PortListener) -> Result<(), BootError> {
        let ports = js_sys::Reflect::get(&self.app, &JsValue::from_str(PORTS_PROPERTY))
            .unwrap_or(JsValue::UNDEFINED);
        let handle = if ports.is_object() {
            js_sys::Reflect::get(&ports, &JsValue::from_str(port.as_str()))
                .unwrap_or(JsValue::UNDEFINED)
        } else {
            JsValue::UNDEFINED
        };
        // The core compiler drops ports its program never uses.
        if handle.is_undefined() {
            warn!("core application does not expose port {}", port.as_str());
            return Ok(());
        }

        let callback = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            listener(&js_to_json(&value));
        });
        call_method(&handle, SUBSCRIBE_METHOD, &[callback.as_ref().clone()]).map_err(
            |reason| BootError::Subscription {
                port: port.as_str(),
                reason,
            },
        )?;
        PORT_LISTENERS.with(|listeners| listeners.borrow_mut().push(callback));
        Ok(())
    }
}

fn call_method(target: &JsValue, name: &str, arguments: &[JsValue]) -> Result<JsValue, String> {
    let method = js_sys::Reflect::get(target, &JsValue::from_str(name))
        .map_err(|error| describe_js_error(&error))?;
    let function = method
        .dyn_into::<js_sys::Function>()
        .map_err(|_| format!("`{name}` is not a function"))?;
    let array = js_sys::Array::new();
    for argument in arguments {
        array.push(argument);
    }
    function
        .apply(target, &array)
        .map_err(|error| describe_js_error(&error))
}
