//! Snapshot rows as JSON lines or CSV.

use std::io::{self, Write};

use clap::ValueEnum;
use electrical::gauge_voltage;
use serde::Serialize;
use vehicle::DashboardSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One JSON object per line
    Json,
    Csv,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    t: f64,
    #[serde(flatten)]
    snapshot: &'a DashboardSnapshot,
}

const CSV_HEADER: &str = "t,rpm,speedKmh,gear,engineTemp,oilTemp,oilPressure,transTemp,fuelLiters,\
batteryPct,fuelUsageL100km,rangeKm,odometerKm,afr,powerHp,torqueNm,accelG,timer0to100,best0to100,\
iatTemp,vePct,slipRpm,lockup,battVolts";

pub struct SnapshotWriter<W: Write> {
    out: W,
    format: Format,
    header_written: bool,
}

impl<W: Write> SnapshotWriter<W> {
    pub fn new(out: W, format: Format) -> Self {
        Self {
            out,
            format,
            header_written: false,
        }
    }

    pub fn write(&mut self, t: f64, snapshot: &DashboardSnapshot) -> io::Result<()> {
        match self.format {
            Format::Json => {
                let line = serde_json::to_string(&JsonRow { t, snapshot })?;
                writeln!(self.out, "{}", line)
            }
            Format::Csv => {
                if !self.header_written {
                    writeln!(self.out, "{}", CSV_HEADER)?;
                    self.header_written = true;
                }
                let s = snapshot;
                writeln!(
                    self.out,
                    "{:.3},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{:.2}",
                    t, s.rpm, s.speed_kmh, s.gear, s.engine_temp, s.oil_temp, s.oil_pressure,
                    s.trans_temp, s.fuel_liters, s.battery_pct, s.fuel_usage_l100km, s.range_km,
                    s.odometer_km, s.afr, s.power_hp, s.torque_nm, s.accel_g, s.timer_0to100,
                    s.best_0to100, s.iat_temp, s.ve_pct, s.slip_rpm, s.lockup,
                    gauge_voltage(s.battery_pct)
                )
            }
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
