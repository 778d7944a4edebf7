use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_error::{abort_call_site, proc_macro_error, ResultExt};
use quote::quote;
use syn::{self, ext::IdentExt, Attribute, DataEnum, DataStruct, DeriveInput, Fields, Variant};

fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|a| match a.path.get_ident() {
        None => false,
        Some(ident) => ident.unraw().to_string().eq(name),
    })
}

fn find_attr_fields<'a>(fields: &'a Fields, name: &str) -> Option<&'a Ident> {
    let fields = fields
        .iter()
        .filter(|f| has_attr(&f.attrs, name))
        .collect::<Vec<_>>();
    match fields.len() {
        0 => None,
        1 => fields[0].ident.as_ref(),
        _ => abort_call_site!(format!("Multiple fields found with attribute #[{name}]")),
    }
}

/// `NoteOnEvent` -> `note_on`, which is both the receiver callback and the
/// suffix of the generated `Event::new_*` constructors.
fn callback_from_struct(name: &Ident) -> Ident {
    let struct_name = name.unraw().to_string();
    let event_name = match struct_name.strip_suffix("Event") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => abort_call_site!(format!(
            "Event structs must be named `<Kind>Event`, found `{struct_name}`"
        )),
    };
    Ident::new(&event_name.to_case(Case::Snake), Span::call_site())
}

fn event_struct_from_enum(name: &Ident) -> Ident {
    let event_name = name.unraw().to_string();
    let event_name = event_name + "Event";
    Ident::new(&event_name[..], name.span())
}

/// Generates the `MIDIEvent` accessors, a `new` constructor, the `Event::new_*`
/// helpers and the `DispatchEvent` impl that replays the struct into a receiver.
///
/// Field order is the argument order of the matching `EventReceiver` callback.
/// Fields marked `#[bytes]` are lent to the callback as slices.
#[proc_macro_derive(ReceiverEvent, attributes(key, channel, bytes))]
#[proc_macro_error]
pub fn receiver_event(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = syn::parse(input).expect_or_abort("Couldn't parse for ReceiverEvent");

    let name = &ast.ident;
    let generics = &ast.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    if let syn::Data::Struct(DataStruct { ref fields, .. }) = ast.data {
        let key_field = find_attr_fields(fields, "key");
        let channel_field = find_attr_fields(fields, "channel");

        if key_field.is_some() && channel_field.is_none() {
            abort_call_site!(
                "Key events must also have a channel (use #[channel] along with #[key])!"
            );
        }

        let callback = callback_from_struct(name);
        let variant = Ident::new(
            &callback.to_string().to_case(Case::Pascal),
            Span::call_site(),
        );
        let new_ident = Ident::new(&format!("new_{callback}")[..], Span::call_site());
        let new_delta_ident = Ident::new(&format!("new_delta_{callback}")[..], Span::call_site());

        let mut new_args = Vec::new();
        let mut assign = Vec::new();
        let mut dispatch_args = Vec::new();

        for field in fields.iter() {
            match &field.ident {
                None => abort_call_site!("#[derive(ReceiverEvent)] needs named fields"),
                Some(ident) => {
                    let ty = &field.ty;
                    new_args.push(quote! {#ident: #ty,});
                    assign.push(quote! {#ident,});
                    if has_attr(&field.attrs, "bytes") {
                        dispatch_args.push(quote! {&self.#ident[..]});
                    } else {
                        dispatch_args.push(quote! {self.#ident});
                    }
                }
            }
        }

        let mut generated_impl = Vec::new();

        let key = match key_field {
            None => quote! { None },
            Some(ident) => {
                generated_impl.push(quote! {
                    #[inline(always)]
                    pub fn key(&self) -> u8 {
                        self.#ident
                    }
                });
                quote! { Some(self.#ident) }
            }
        };

        let channel = match channel_field {
            None => quote! { None },
            Some(ident) => {
                generated_impl.push(quote! {
                    #[inline(always)]
                    pub fn channel(&self) -> u8 {
                        self.#ident
                    }
                });
                quote! { Some(self.#ident) }
            }
        };

        let doc_new = &format!("Creates a new `{name}`.");
        let doc_event = &format!(
            "Creates a new [`{name}`](crate::events::{name}) wrapped in [`Event::{variant}`](crate::events::Event::{variant})."
        );

        let gen = quote! {
            impl #impl_generics #name #ty_generics #where_clause {
                #[doc=#doc_new]
                #[inline(always)]
                pub fn new(#(#new_args)*) -> Self {
                    Self {
                        #(#assign)*
                    }
                }

                #(#generated_impl)*
            }

            impl #impl_generics MIDIEvent for #name #ty_generics #where_clause {
                #[inline(always)]
                fn key(&self) -> Option<u8> {
                    #key
                }

                #[inline(always)]
                fn channel(&self) -> Option<u8> {
                    #channel
                }
            }

            impl #impl_generics DispatchEvent for #name #ty_generics #where_clause {
                #[inline(always)]
                fn dispatch<R: EventReceiver + ?Sized>(&self, delta: u64, receiver: &mut R) {
                    receiver.#callback(delta, #(#dispatch_args),*)
                }
            }

            impl Event {
                #[doc=#doc_event]
                #[inline(always)]
                pub fn #new_ident(#(#new_args)*) -> Event {
                    Event::#variant(#name::new(#(#assign)*))
                }

                #[doc=#doc_event]
                #[inline(always)]
                pub fn #new_delta_ident<D: MIDINum>(delta: D, #(#new_args)*) -> Delta<D, Event> {
                    Delta::new(delta, Event::#variant(#name::new(#(#assign)*)))
                }
            }
        };

        gen.into()
    } else {
        abort_call_site!("#[derive(ReceiverEvent)] is only defined for structs, not for enums!");
    }
}

/// Wires the event enum to its variant structs: `MIDIEvent`, `DispatchEvent`
/// and a `From` conversion per variant.
#[proc_macro_derive(EventImpl)]
#[proc_macro_error]
pub fn event_impl(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = syn::parse(input).expect_or_abort("Couldn't parse for EventImpl");

    let name = &ast.ident;
    let generics = &ast.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    if let syn::Data::Enum(DataEnum { variants, .. }) = ast.data {
        fn match_all(lines: Vec<TokenStream2>) -> TokenStream2 {
            quote! {
                match self {
                    #(#lines)*
                }
            }
        }

        fn create_match<T: Fn(&Variant) -> TokenStream2>(
            name: &Ident,
            variants: &[&Variant],
            map: T,
        ) -> TokenStream2 {
            match_all(
                variants
                    .iter()
                    .map(|v| {
                        let ident = &v.ident;
                        let res = map(v);
                        quote! {
                            #name::#ident(event) => #res,
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        }

        let variants = variants.iter().collect::<Vec<_>>();
        for variant in variants.iter() {
            if variant.fields.len() != 1 {
                abort_call_site!(format!(
                    "Variant `{}` must wrap exactly one event struct",
                    variant.ident
                ));
            }
        }

        let key = create_match(name, &variants, |_| quote! { MIDIEvent::key(event) });
        let channel = create_match(name, &variants, |_| quote! { MIDIEvent::channel(event) });
        let dispatch = create_match(
            name,
            &variants,
            |_| quote! { DispatchEvent::dispatch(event, delta, receiver) },
        );

        let mut from_impl = Vec::new();
        for variant in variants.iter() {
            let ident = &variant.ident;
            let struct_ident = event_struct_from_enum(ident);
            from_impl.push(quote! {
                impl #impl_generics From<#struct_ident> for #name #ty_generics #where_clause {
                    #[inline(always)]
                    fn from(event: #struct_ident) -> Self {
                        #name::#ident(event)
                    }
                }
            });
        }

        let gen = quote! {
            impl #impl_generics MIDIEvent for #name #ty_generics #where_clause {
                #[inline(always)]
                fn key(&self) -> Option<u8> {
                    #key
                }

                #[inline(always)]
                fn channel(&self) -> Option<u8> {
                    #channel
                }
            }

            impl #impl_generics DispatchEvent for #name #ty_generics #where_clause {
                #[inline(always)]
                fn dispatch<R: EventReceiver + ?Sized>(&self, delta: u64, receiver: &mut R) {
                    #dispatch
                }
            }

            #(#from_impl)*
        };

        gen.into()
    } else {
        abort_call_site!("#[derive(EventImpl)] is only defined for enums, not for structs!");
    }
}

/// Implements `EventReceiver` by forwarding every callback to the field marked
/// `#[delegate]`.
#[proc_macro_derive(DelegateReceiver, attributes(delegate))]
#[proc_macro_error]
pub fn delegate_receiver(input: TokenStream) -> TokenStream {
    let ast: DeriveInput =
        syn::parse(input).expect_or_abort("Couldn't parse for DelegateReceiver");

    let name = &ast.ident;
    let generics = &ast.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    if let syn::Data::Struct(DataStruct { ref fields, .. }) = ast.data {
        let target = match find_attr_fields(fields, "delegate") {
            Some(ident) => ident,
            None => abort_call_site!("#[derive(DelegateReceiver)] needs a field marked #[delegate]"),
        };

        let gen = quote! {
            impl #impl_generics EventReceiver for #name #ty_generics #where_clause {
                #[inline(always)]
                fn note_on(&mut self, delta: u64, channel: u8, key: u8, velocity: u8) {
                    self.#target.note_on(delta, channel, key, velocity)
                }

                #[inline(always)]
                fn note_off(&mut self, delta: u64, channel: u8, key: u8, velocity: u8) {
                    self.#target.note_off(delta, channel, key, velocity)
                }

                #[inline(always)]
                fn polyphonic_key_pressure(&mut self, delta: u64, channel: u8, key: u8, pressure: u8) {
                    self.#target.polyphonic_key_pressure(delta, channel, key, pressure)
                }

                #[inline(always)]
                fn control_change(&mut self, delta: u64, channel: u8, controller: u8, value: u8) {
                    self.#target.control_change(delta, channel, controller, value)
                }

                #[inline(always)]
                fn program_change(&mut self, delta: u64, channel: u8, program: u8) {
                    self.#target.program_change(delta, channel, program)
                }

                #[inline(always)]
                fn channel_pressure(&mut self, delta: u64, channel: u8, pressure: u8) {
                    self.#target.channel_pressure(delta, channel, pressure)
                }

                #[inline(always)]
                fn pitch_wheel_change(&mut self, delta: u64, channel: u8, value: u16) {
                    self.#target.pitch_wheel_change(delta, channel, value)
                }

                #[inline(always)]
                fn meta(&mut self, delta: u64, kind: u8, data: &[u8]) {
                    self.#target.meta(delta, kind, data)
                }

                #[inline(always)]
                fn sysex(&mut self, delta: u64, data: &[u8]) {
                    self.#target.sysex(delta, data)
                }
            }
        };

        gen.into()
    } else {
        abort_call_site!("#[derive(DelegateReceiver)] is only defined for structs, not for enums!");
    }
}
