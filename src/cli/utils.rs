//! Utilities for creating the command line interface.

use crate::{
    exit_on_error, exit_with_error,
    geometry::{Dim3, In3D},
    num::BFloat,
};
use clap::ArgMatches;
use std::str::FromStr;

pub fn parse_value_string<T>(argument_name: &str, value_string: &str) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    exit_on_error!(
        value_string.parse(),
        "Error: Could not parse value for {0}: {1}",
        argument_name
    )
}

fn parse_value_strings<'a, T, I>(argument_name: &str, value_strings: I) -> Vec<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
    I: Iterator<Item = &'a String>,
{
    value_strings
        .filter_map(|value_string| {
            if value_string.is_empty() {
                None
            } else {
                Some(parse_value_string(argument_name, value_string))
            }
        })
        .collect()
}

fn verify_finite_float_value<F: BFloat>(argument_name: &str, value: F) {
    if !value.is_finite() {
        exit_with_error!("Error: {} must be finite", argument_name);
    }
}

fn verify_argument_value_count<T>(argument_name: &str, values: &[T], required_count: usize) {
    let count = values.len();
    if count != required_count {
        exit_with_error!(
            "Error: {} must have {} values, got {}",
            argument_name,
            required_count,
            count
        );
    }
}

pub fn get_value_from_required_parseable_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    match arguments.get_one::<String>(argument_name) {
        Some(value_string) => parse_value_string(argument_name, value_string),
        None => exit_with_error!("Error: No value for {}", argument_name),
    }
}

pub fn get_finite_float_value_from_required_parseable_argument<F>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> F
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: std::fmt::Display,
{
    let value: F = get_value_from_required_parseable_argument(arguments, argument_name);
    verify_finite_float_value(argument_name, value);
    value
}

pub fn get_value_from_parseable_argument<T>(arguments: &ArgMatches, argument_name: &str) -> Option<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    arguments
        .get_one::<String>(argument_name)
        .map(|value_string| parse_value_string(argument_name, value_string))
}

pub fn get_finite_float_values_from_required_parseable_argument<F>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> Vec<F>
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: std::fmt::Display,
{
    let values: Vec<F> = match arguments.get_many::<String>(argument_name) {
        Some(value_strings) => parse_value_strings(argument_name, value_strings),
        None => exit_with_error!("Error: No values for {}", argument_name),
    };
    values
        .iter()
        .for_each(|&value| verify_finite_float_value(argument_name, value));
    values
}

pub fn get_finite_float_3d_value_from_required_parseable_argument<F>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> In3D<F>
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: std::fmt::Display,
{
    let values = get_finite_float_values_from_required_parseable_argument(arguments, argument_name);
    verify_argument_value_count(argument_name, &values, 3);
    In3D::with_each_component(|dim: Dim3| values[dim.num()])
}
